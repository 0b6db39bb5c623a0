use crate::bookmarks::region::RegionRecord;
use crate::utils::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BOOKMARK_WIDGET_ID: &str = "GridBookmark";
pub const BOOKMARK_WIDGET_TYPE: &str = "GridBookmarkWidget";

fn default_id() -> String {
    BOOKMARK_WIDGET_ID.to_string()
}

fn default_type() -> String {
    BOOKMARK_WIDGET_TYPE.to_string()
}

/// Ordered collection of bookmarks, stored in a session as the
/// `GridBookmark` widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkStore {
    #[serde(default = "default_id")]
    id: String,
    #[serde(rename = "type", default = "default_type")]
    widget_type: String,
    #[serde(default)]
    bookmarked_regions: Vec<RegionRecord>,
    /// Widget state this crate does not interpret, kept for the next save.
    #[serde(flatten)]
    other: Map<String, Value>,
}

impl Default for BookmarkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self {
            id: default_id(),
            widget_type: default_type(),
            bookmarked_regions: Vec::new(),
            other: Map::new(),
        }
    }

    pub fn widget_type(&self) -> &str {
        &self.widget_type
    }

    pub fn regions(&self) -> &[RegionRecord] {
        &self.bookmarked_regions
    }

    pub fn into_regions(self) -> Vec<RegionRecord> {
        self.bookmarked_regions
    }

    pub fn len(&self) -> usize {
        self.bookmarked_regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookmarked_regions.is_empty()
    }

    pub fn newest(&self) -> Option<&RegionRecord> {
        self.bookmarked_regions.last()
    }

    pub fn add_bookmark(&mut self, region: RegionRecord) {
        self.bookmarked_regions.push(region);
    }

    pub fn import_bookmarks(&mut self, regions: impl IntoIterator<Item = RegionRecord>) -> usize {
        let before = self.bookmarked_regions.len();
        self.bookmarked_regions.extend(regions);
        self.bookmarked_regions.len() - before
    }

    pub fn remove_bookmark(&mut self, index: usize) -> Result<RegionRecord> {
        self.check_index(index)?;
        Ok(self.bookmarked_regions.remove(index))
    }

    /// An empty label clears it.
    pub fn update_bookmark_label(&mut self, index: usize, label: &str) -> Result<()> {
        self.check_index(index)?;
        self.bookmarked_regions[index].label = match label {
            "" => None,
            label => Some(label.to_string()),
        };
        Ok(())
    }

    pub fn clear_all_bookmarks(&mut self) -> usize {
        let count = self.bookmarked_regions.len();
        self.bookmarked_regions.clear();
        count
    }

    /// Distinct assembly names in first-seen order.
    pub fn assemblies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for region in &self.bookmarked_regions {
            if !names.contains(&region.assembly_name.as_str()) {
                names.push(&region.assembly_name);
            }
        }
        names
    }

    pub fn bookmarks_for_assembly<'a>(
        &'a self,
        assembly_name: &'a str,
    ) -> impl Iterator<Item = &'a RegionRecord> + 'a {
        self.bookmarked_regions
            .iter()
            .filter(move |region| region.assembly_name == assembly_name)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.bookmarked_regions.len() {
            return Err(format!(
                "Bookmark index {} out of range (store has {} bookmarks)",
                index,
                self.bookmarked_regions.len()
            ));
        }
        Ok(())
    }
}
