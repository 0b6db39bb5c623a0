use crate::bookmarks::{region::RegionRecord, session::WidgetRegistry, store::BookmarkStore};
use crate::utils::Result;

/// A view that shows a region of a genome and can be moved to another one.
pub trait BookmarkableView {
    fn displayed_region(&self) -> Option<RegionRecord>;
    fn nav_to(&mut self, region: &RegionRecord) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            level: NotificationLevel::Success,
        }
    }

    fn info(message: &str) -> Self {
        Self {
            message: message.to_string(),
            level: NotificationLevel::Info,
        }
    }
}

pub fn bookmark_current_region(
    view: &impl BookmarkableView,
    store: &mut BookmarkStore,
) -> Result<Notification> {
    let region = view
        .displayed_region()
        .ok_or_else(|| "No region is displayed to bookmark".to_string())?;
    store.add_bookmark(region);
    Ok(Notification::success("Bookmark created."))
}

/// Moves the view to the most recently added bookmark, creating the bookmark
/// widget first if the session has none.
pub fn navigate_newest_bookmark(
    view: &mut impl BookmarkableView,
    widgets: &mut WidgetRegistry,
) -> Result<Notification> {
    match widgets.bookmarks_or_create().newest() {
        Some(region) => {
            view.nav_to(region)?;
            Ok(Notification::success(
                "Navigated to the most recently created bookmark.",
            ))
        }
        None => Ok(Notification::info(
            "There are no recent bookmarks to navigate to.",
        )),
    }
}

/// A view reduced to the region it displays.
#[derive(Debug, Clone, Default)]
pub struct LocusView {
    region: Option<RegionRecord>,
}

impl LocusView {
    pub fn new(region: Option<RegionRecord>) -> Self {
        Self { region }
    }
}

impl BookmarkableView for LocusView {
    fn displayed_region(&self) -> Option<RegionRecord> {
        self.region.clone()
    }

    fn nav_to(&mut self, region: &RegionRecord) -> Result<()> {
        self.region = Some(region.clone());
        Ok(())
    }
}
