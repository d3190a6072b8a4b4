// src/model/mod.rs
//! The raw input contract — the shape of data this crate requires from the
//! fetch layer.
//!
//! The fetch layer materializes the whole workspace into one JSON document:
//! an ordered mapping from entity ID to raw node, parents before children.
//! Everything here is a typed accessor over that document; no field is
//! located by searching, every known shape has a struct.

mod block;
mod blocks;
mod properties;

pub use block::Block;
pub use blocks::*;
pub use properties::{DateValue, Person, PropertyFile, PropertyValue, SelectOption};

use crate::types::{EntityId, RichTextItem};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The full raw content document. Insertion order is the document order,
/// which the root-ID fallback depends on.
pub type RawContent = IndexMap<EntityId, RawNode>;

/// One raw page, database, or database-entry node.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    /// Declared object kind: "page" or "database".
    pub object: String,
    pub parent: RawParent,
    /// Property bag; pages carry their title here under the "title" key.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
    /// Databases carry their title as a top-level rich text list.
    #[serde(default)]
    pub title: Vec<RichTextItem>,
    #[serde(default)]
    pub cover: Option<FileRef>,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub last_edited_time: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Parent descriptor, tagged by the source system.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawParent {
    Workspace {
        #[serde(default)]
        workspace: bool,
    },
    PageId {
        page_id: EntityId,
    },
    DatabaseId {
        database_id: EntityId,
    },
}

impl RawParent {
    /// The parent entity ID, if any. Only the workspace root has none.
    pub fn id(&self) -> Option<&EntityId> {
        match self {
            RawParent::Workspace { .. } => None,
            RawParent::PageId { page_id } => Some(page_id),
            RawParent::DatabaseId { database_id } => Some(database_id),
        }
    }

    pub fn is_database(&self) -> bool {
        matches!(self, RawParent::DatabaseId { .. })
    }
}

/// A reference to a hosted file, either external or uploaded.
///
/// Covers, image/video/file blocks, and file properties all share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileRef {
    External { external: UrlHolder },
    File { file: UrlHolder },
}

impl FileRef {
    pub fn url(&self) -> &str {
        match self {
            FileRef::External { external } => &external.url,
            FileRef::File { file } => &file.url,
        }
    }

    pub fn url_mut(&mut self) -> &mut String {
        match self {
            FileRef::External { external } => &mut external.url,
            FileRef::File { file } => &mut file.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlHolder {
    pub url: String,
}

/// Page/database icon: an emoji glyph or a file reference, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Icon {
    Emoji { emoji: String },
    FileRef(FileRef),
}

impl Icon {
    pub fn emoji(&self) -> Option<&str> {
        match self {
            Icon::Emoji { emoji } => Some(emoji),
            Icon::FileRef(_) => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Icon::Emoji { .. } => None,
            Icon::FileRef(file) => Some(file.url()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_descriptor_variants() {
        let workspace: RawParent =
            serde_json::from_value(serde_json::json!({"type": "workspace", "workspace": true}))
                .unwrap();
        assert!(workspace.id().is_none());

        let db: RawParent =
            serde_json::from_value(serde_json::json!({"type": "database_id", "database_id": "db1"}))
                .unwrap();
        assert!(db.is_database());
        assert_eq!(db.id().unwrap().as_str(), "db1");
    }

    #[test]
    fn cover_file_ref_reads_either_shape() {
        let external: FileRef = serde_json::from_value(serde_json::json!({
            "type": "external",
            "external": {"url": "https://example.org/a.png"}
        }))
        .unwrap();
        assert_eq!(external.url(), "https://example.org/a.png");

        let uploaded: FileRef = serde_json::from_value(serde_json::json!({
            "type": "file",
            "file": {"url": "https://files.example.org/b.jpg"}
        }))
        .unwrap();
        assert_eq!(uploaded.url(), "https://files.example.org/b.jpg");
    }

    #[test]
    fn icon_emoji_and_file_are_distinguished() {
        let emoji: Icon = serde_json::from_value(serde_json::json!({"emoji": "📜"})).unwrap();
        assert_eq!(emoji.emoji(), Some("📜"));
        assert_eq!(emoji.url(), None);

        let file: Icon = serde_json::from_value(
            serde_json::json!({"type": "file", "file": {"url": "https://example.org/icon.png"}}),
        )
        .unwrap();
        assert_eq!(file.url(), Some("https://example.org/icon.png"));
    }
}
