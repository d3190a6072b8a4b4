// src/model/blocks.rs
//! Per-kind block payloads.
//!
//! Raw block JSON carries the payload under a field named after the block
//! type; the dispatcher in `block.rs` extracts that field and deserializes it
//! into one of these structs.

use super::{FileRef, Icon};
use crate::types::{EntityId, RichTextItem};
use serde::Deserialize;

/// Fields shared by every block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockCommon {
    #[serde(default)]
    pub id: EntityId,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub children: Vec<super::Block>,
}

/// Payload for blocks whose content is just rich text: paragraph, headings,
/// quote, toggle, list items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextPayload {
    #[serde(default, alias = "rich_text")]
    pub text: Vec<RichTextItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalloutPayload {
    #[serde(default, alias = "rich_text")]
    pub text: Vec<RichTextItem>,
    #[serde(default)]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToDoPayload {
    #[serde(default, alias = "rich_text")]
    pub text: Vec<RichTextItem>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodePayload {
    #[serde(default, alias = "rich_text")]
    pub text: Vec<RichTextItem>,
    #[serde(default)]
    pub language: String,
}

/// Embeds and bookmarks carry a plain URL.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkPayload {
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
}

/// Images, videos, and file blocks carry a hosted-file reference.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaPayload {
    #[serde(flatten)]
    pub source: FileRef,
    #[serde(default)]
    pub caption: Vec<RichTextItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquationPayload {
    pub expression: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableRowPayload {
    #[serde(default)]
    pub cells: Vec<Vec<RichTextItem>>,
}

/// A block of a kind this converter does not know. The type name is kept so
/// the rendered placeholder names what was skipped.
#[derive(Debug, Clone)]
pub struct UnsupportedPayload {
    pub block_type: String,
}

/// One fully-typed block: shared fields plus the kind-specific payload.
#[derive(Debug, Clone)]
pub struct BlockNode<P> {
    pub common: BlockCommon,
    pub payload: P,
}

pub type ParagraphBlock = BlockNode<TextPayload>;
pub type HeadingBlock = BlockNode<TextPayload>;
pub type CalloutBlock = BlockNode<CalloutPayload>;
pub type QuoteBlock = BlockNode<TextPayload>;
pub type ListItemBlock = BlockNode<TextPayload>;
pub type ToDoBlock = BlockNode<ToDoPayload>;
pub type CodeBlock = BlockNode<CodePayload>;
pub type LinkBlock = BlockNode<LinkPayload>;
pub type MediaBlock = BlockNode<MediaPayload>;
pub type EquationBlock = BlockNode<EquationPayload>;
pub type DividerBlock = BlockNode<()>;
pub type TableBlock = BlockNode<()>;
pub type TableRowBlock = BlockNode<TableRowPayload>;
pub type ChildRefBlock = BlockNode<()>;
pub type UnsupportedBlock = BlockNode<UnsupportedPayload>;

impl<P> BlockNode<P> {
    pub fn id(&self) -> &EntityId {
        &self.common.id
    }
}
