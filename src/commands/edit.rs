use crate::bookmarks::{
    bookmark_current_region, navigate_newest_bookmark, view::NotificationLevel, BookmarkableView,
    LocusView, SessionSnapshot,
};
use crate::cli::{AddArgs, LabelArgs, RemoveArgs, StoreArgs};
use crate::utils::{parse_locus, Result};

pub fn add(args: AddArgs) -> Result<()> {
    let mut region = parse_locus(&args.region, &args.assembly_name)?;
    region.label = args.label.filter(|label| !label.is_empty());

    let mut session = SessionSnapshot::load(&args.store.store_path)?;
    let store = session.widgets.bookmarks_or_create();
    let note = bookmark_current_region(&LocusView::new(Some(region)), store)?;
    log::info!("{}", note.message);
    session.save(&args.store.store_path)
}

/// Prints the locus of the newest bookmark.
pub fn newest(args: StoreArgs) -> Result<()> {
    let mut session = SessionSnapshot::load(&args.store_path)?;
    let mut view = LocusView::default();
    let note = navigate_newest_bookmark(&mut view, &mut session.widgets)?;
    match (note.level, view.displayed_region()) {
        (NotificationLevel::Success, Some(region)) => {
            log::info!("{}", note.message);
            println!(
                "{}\t{}\t{}",
                region.loc_string(),
                region.assembly_name,
                region.label.as_deref().unwrap_or_default()
            );
        }
        _ => log::warn!("{}", note.message),
    }
    Ok(())
}

pub fn label(args: LabelArgs) -> Result<()> {
    let mut session = SessionSnapshot::load(&args.store.store_path)?;
    session
        .widgets
        .bookmarks_mut()
        .ok_or_else(|| format!("{} holds no bookmarks", args.store.store_path.display()))?
        .update_bookmark_label(args.index, &args.label)?;
    session.save(&args.store.store_path)
}

pub fn remove(args: RemoveArgs) -> Result<()> {
    let mut session = SessionSnapshot::load(&args.store.store_path)?;
    let removed = session
        .widgets
        .bookmarks_mut()
        .ok_or_else(|| format!("{} holds no bookmarks", args.store.store_path.display()))?
        .remove_bookmark(args.index)?;
    log::info!("Removed bookmark {}", removed.loc_string());
    session.save(&args.store.store_path)
}

pub fn clear(args: StoreArgs) -> Result<()> {
    let mut session = SessionSnapshot::load(&args.store_path)?;
    let count = session
        .widgets
        .bookmarks_mut()
        .map(|store| store.clear_all_bookmarks())
        .unwrap_or(0);
    log::info!("Cleared {} bookmarks", count);
    session.save(&args.store_path)
}
