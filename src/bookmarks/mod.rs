pub mod bed;
pub mod export;
pub mod region;
pub mod session;
pub mod share_link;
pub mod store;
pub mod view;

pub use bed::{parse_bookmarks, read_bookmarks};
pub use export::{format_bookmarks, ExportFormat};
pub use region::RegionRecord;
pub use session::{SessionSnapshot, WidgetRegistry};
pub use share_link::{AbortController, AbortSignal, ShareLink, ShareLinkResolver, DEFAULT_SHARE_URL};
pub use store::BookmarkStore;
pub use view::{bookmark_current_region, navigate_newest_bookmark, BookmarkableView, LocusView};
