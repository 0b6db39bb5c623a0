use crate::bookmarks::{format_bookmarks, SessionSnapshot};
use crate::cli::ExportArgs;
use crate::utils::Result;
use std::{fs, io::Write};

pub fn export(args: ExportArgs) -> Result<()> {
    let session = SessionSnapshot::load(&args.store.store_path)?;
    let regions = session
        .widgets
        .bookmarks()
        .map(|store| store.regions())
        .unwrap_or_default();

    let text = format_bookmarks(regions, args.format, args.assembly_name.as_deref())?;

    match &args.output_path {
        Some(path) => {
            fs::write(path, &text).map_err(|e| format!("{}: {}", path.display(), e))?;
            log::info!("Exported bookmarks to {}", path.display());
        }
        None => std::io::stdout()
            .write_all(text.as_bytes())
            .map_err(|e| e.to_string())?,
    }
    Ok(())
}
