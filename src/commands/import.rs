use crate::bookmarks::{read_bookmarks, SessionSnapshot, ShareLinkResolver};
use crate::cli::ImportArgs;
use crate::utils::Result;
use std::time::Duration;

/// Imports the file first, then the share link. The store is only written
/// once both succeed.
pub fn import(args: ImportArgs) -> Result<()> {
    let store_path = &args.store.store_path;
    let mut session = SessionSnapshot::load(store_path)?;
    let store = session.widgets.bookmarks_or_create();

    if let Some(location) = &args.file {
        let regions = read_bookmarks(location, &args.assembly_name)?;
        let count = store.import_bookmarks(regions);
        log::info!("Imported {} bookmarks from {}", count, location);
    }

    if let Some(link) = &args.share_link {
        let resolver =
            ShareLinkResolver::with_timeout(&args.share_url, Duration::from_secs(args.timeout_secs))?;
        let regions = resolver.resolve(link, None)?;
        let count = store.import_bookmarks(regions);
        log::info!("Imported {} bookmarks from share link", count);
    }

    let total = store.len();
    session.save(store_path)?;
    log::info!("{} now holds {} bookmarks", store_path.display(), total);
    Ok(())
}
