//! Saved session snapshots and the widget registry inside them.
//!
//! The same schema is used for the local store file and for sessions fetched
//! through a share link. Only the bookmark widget is typed; every other
//! widget and top-level key is carried through untouched.

use crate::bookmarks::store::{BookmarkStore, BOOKMARK_WIDGET_ID, BOOKMARK_WIDGET_TYPE};
use crate::utils::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fs, io::ErrorKind, path::Path};

#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    bookmarks: Option<BookmarkStore>,
    others: BTreeMap<String, Value>,
}

impl WidgetRegistry {
    pub fn bookmarks(&self) -> Option<&BookmarkStore> {
        self.bookmarks.as_ref()
    }

    pub fn bookmarks_mut(&mut self) -> Option<&mut BookmarkStore> {
        self.bookmarks.as_mut()
    }

    pub fn bookmarks_or_create(&mut self) -> &mut BookmarkStore {
        self.bookmarks.get_or_insert_with(|| {
            log::debug!("Creating {} widget", BOOKMARK_WIDGET_ID);
            BookmarkStore::new()
        })
    }

    pub fn take_bookmarks(&mut self) -> Option<BookmarkStore> {
        self.bookmarks.take()
    }

    pub fn len(&self) -> usize {
        self.others.len() + usize::from(self.bookmarks.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<BTreeMap<String, Value>> for WidgetRegistry {
    type Error = String;

    fn try_from(mut widgets: BTreeMap<String, Value>) -> Result<Self> {
        let bookmarks = match widgets.remove(BOOKMARK_WIDGET_ID) {
            Some(widget) => {
                let store: BookmarkStore = serde_json::from_value(widget)
                    .map_err(|e| format!("Malformed {} widget: {}", BOOKMARK_WIDGET_ID, e))?;
                if store.widget_type() != BOOKMARK_WIDGET_TYPE {
                    return Err(format!(
                        "Malformed {} widget: expected type {}, found {}",
                        BOOKMARK_WIDGET_ID,
                        BOOKMARK_WIDGET_TYPE,
                        store.widget_type()
                    ));
                }
                Some(store)
            }
            None => None,
        };
        Ok(Self {
            bookmarks,
            others: widgets,
        })
    }
}

impl Serialize for WidgetRegistry {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut widgets = self.others.clone();
        if let Some(store) = &self.bookmarks {
            let value = serde_json::to_value(store).map_err(serde::ser::Error::custom)?;
            widgets.insert(BOOKMARK_WIDGET_ID.to_string(), value);
        }
        widgets.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WidgetRegistry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let widgets = BTreeMap::<String, Value>::deserialize(deserializer)?;
        WidgetRegistry::try_from(widgets).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub widgets: WidgetRegistry,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl SessionSnapshot {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| format!("Could not decode session: {}", e))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Could not encode session: {}", e))
    }

    /// A missing file is an empty session.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text).map_err(|e| format!("{}: {}", path.display(), e)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} does not exist, starting an empty session", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(format!("{}: {}", path.display(), e)),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json + "\n").map_err(|e| format!("{}: {}", path.display(), e))
    }
}
