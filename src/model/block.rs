// src/model/block.rs
//! The block tagged union and its type-discriminator deserializer.
//!
//! Raw block JSON names its payload field after the block type, so the
//! dispatcher reads the `"type"` discriminator and deserializes the matching
//! payload. Unknown kinds fold into `Unsupported` instead of failing — a
//! document must never be rejected because it contains a block this
//! converter has not learned yet.

use super::blocks::*;
use crate::types::EntityId;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(HeadingBlock),
    Heading2(HeadingBlock),
    Heading3(HeadingBlock),
    Callout(CalloutBlock),
    Quote(QuoteBlock),
    Toggle(ListItemBlock),
    BulletedListItem(ListItemBlock),
    NumberedListItem(ListItemBlock),
    ToDo(ToDoBlock),
    Code(CodeBlock),
    Embed(LinkBlock),
    Bookmark(LinkBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    File(MediaBlock),
    Equation(EquationBlock),
    Divider(DividerBlock),
    Table(TableBlock),
    TableRow(TableRowBlock),
    ChildPage(ChildRefBlock),
    ChildDatabase(ChildRefBlock),
    ChildEntry(ChildRefBlock),
    Unsupported(UnsupportedBlock),
}

/// Macro to reduce boilerplate in Block accessor methods.
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Toggle($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Embed($pattern) => $result,
            Block::Bookmark($pattern) => $result,
            Block::Image($pattern) => $result,
            Block::Video($pattern) => $result,
            Block::File($pattern) => $result,
            Block::Equation($pattern) => $result,
            Block::Divider($pattern) => $result,
            Block::Table($pattern) => $result,
            Block::TableRow($pattern) => $result,
            Block::ChildPage($pattern) => $result,
            Block::ChildDatabase($pattern) => $result,
            Block::ChildEntry($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

impl Block {
    pub fn id(&self) -> &EntityId {
        match_all_blocks!(self, b => &b.common.id)
    }

    pub fn children(&self) -> &[Block] {
        match_all_blocks!(self, b => &b.common.children)
    }

    pub fn has_children(&self) -> bool {
        match_all_blocks!(self, b => b.common.has_children && !b.common.children.is_empty())
    }

    /// The raw type name, as the source system spells it.
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::Callout(_) => "callout",
            Block::Quote(_) => "quote",
            Block::Toggle(_) => "toggle",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Code(_) => "code",
            Block::Embed(_) => "embed",
            Block::Bookmark(_) => "bookmark",
            Block::Image(_) => "image",
            Block::Video(_) => "video",
            Block::File(_) => "file",
            Block::Equation(_) => "equation",
            Block::Divider(_) => "divider",
            Block::Table(_) => "table",
            Block::TableRow(_) => "table_row",
            Block::ChildPage(_) => "child_page",
            Block::ChildDatabase(_) => "child_database",
            Block::ChildEntry(_) => "db_entry",
            Block::Unsupported(b) => &b.payload.block_type,
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        block_from_value(value).map_err(serde::de::Error::custom)
    }
}

fn block_from_value(value: Value) -> Result<Block, serde_json::Error> {
    let block_type = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    let common = BlockCommon {
        id: value
            .get("id")
            .and_then(Value::as_str)
            .map(EntityId::from)
            .unwrap_or_default(),
        has_children: value
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        children: match value.get("children") {
            Some(children) => serde_json::from_value(children.clone())?,
            None => Vec::new(),
        },
    };

    let payload = value.get(&block_type).cloned().unwrap_or(Value::Null);

    /// Parse the payload for a known kind, degrading to `Unsupported` when
    /// the payload shape is not what this converter expects.
    fn known<P, F>(
        block_type: &str,
        common: BlockCommon,
        payload: Value,
        wrap: F,
    ) -> Block
    where
        P: serde::de::DeserializeOwned,
        F: FnOnce(BlockNode<P>) -> Block,
    {
        match serde_json::from_value::<P>(payload) {
            Ok(parsed) => wrap(BlockNode {
                common,
                payload: parsed,
            }),
            Err(e) => {
                log::debug!("Malformed '{}' payload treated as unsupported: {}", block_type, e);
                Block::Unsupported(BlockNode {
                    common,
                    payload: UnsupportedPayload {
                        block_type: block_type.to_string(),
                    },
                })
            }
        }
    }

    let block = match block_type.as_str() {
        "paragraph" => known(&block_type, common, payload, Block::Paragraph),
        "heading_1" => known(&block_type, common, payload, Block::Heading1),
        "heading_2" => known(&block_type, common, payload, Block::Heading2),
        "heading_3" => known(&block_type, common, payload, Block::Heading3),
        "callout" => known(&block_type, common, payload, Block::Callout),
        "quote" => known(&block_type, common, payload, Block::Quote),
        "toggle" => known(&block_type, common, payload, Block::Toggle),
        "bulleted_list_item" => known(&block_type, common, payload, Block::BulletedListItem),
        "numbered_list_item" => known(&block_type, common, payload, Block::NumberedListItem),
        "to_do" => known(&block_type, common, payload, Block::ToDo),
        "code" => known(&block_type, common, payload, Block::Code),
        "embed" => known(&block_type, common, payload, Block::Embed),
        "bookmark" => known(&block_type, common, payload, Block::Bookmark),
        "image" => known(&block_type, common, payload, Block::Image),
        "video" => known(&block_type, common, payload, Block::Video),
        "file" => known(&block_type, common, payload, Block::File),
        "equation" => known(&block_type, common, payload, Block::Equation),
        "divider" => Block::Divider(BlockNode {
            common,
            payload: (),
        }),
        "table" => Block::Table(BlockNode {
            common,
            payload: (),
        }),
        "table_row" => known(&block_type, common, payload, Block::TableRow),
        "child_page" => Block::ChildPage(BlockNode {
            common,
            payload: (),
        }),
        "child_database" => Block::ChildDatabase(BlockNode {
            common,
            payload: (),
        }),
        // Database entries surface in the block stream as bare references.
        "db_entry" => Block::ChildEntry(BlockNode {
            common,
            payload: (),
        }),
        other => Block::Unsupported(BlockNode {
            common,
            payload: UnsupportedPayload {
                block_type: other.to_string(),
            },
        }),
    };

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paragraph_with_nested_children_parses_recursively() {
        let block: Block = serde_json::from_value(json!({
            "id": "b1",
            "type": "paragraph",
            "has_children": true,
            "paragraph": {"text": [{"type": "text", "text": {"content": "top"}, "plain_text": "top"}]},
            "children": [{
                "id": "b2",
                "type": "bulleted_list_item",
                "has_children": false,
                "bulleted_list_item": {"text": [{"type": "text", "text": {"content": "nested"}, "plain_text": "nested"}]}
            }]
        }))
        .unwrap();

        assert!(matches!(block, Block::Paragraph(_)));
        assert_eq!(block.children().len(), 1);
        assert_eq!(block.children()[0].block_type(), "bulleted_list_item");
    }

    #[test]
    fn unknown_block_kind_folds_into_unsupported() {
        let block: Block = serde_json::from_value(json!({
            "id": "b9",
            "type": "synced_block",
            "has_children": false,
            "synced_block": {}
        }))
        .unwrap();

        assert_eq!(block.block_type(), "synced_block");
        assert!(matches!(block, Block::Unsupported(_)));
    }

    #[test]
    fn malformed_known_payload_degrades_instead_of_failing() {
        let block: Block = serde_json::from_value(json!({
            "id": "b3",
            "type": "equation",
            "equation": {"wrong_field": 1}
        }))
        .unwrap();

        assert!(matches!(block, Block::Unsupported(_)));
        assert_eq!(block.block_type(), "equation");
    }
}
