// src/formatting/blocks.rs
//! Recursive block-to-markdown conversion.
//!
//! One fragment per block, children recursed with tab indentation, tables
//! special-cased into pipe syntax. Reference blocks link through the
//! already-assigned title and URL of the referenced entity, so the URL
//! assigner must have completed before conversion starts.

use super::rich_text::render_rich_text;
use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::model::{Block, Icon};
use crate::site::SiteModel;
use crate::types::EntityId;

/// Marker emitted for a paragraph with no text and no children.
const FORCED_BREAK: &str = "<br/>";

/// Converts one page's block list, collecting referenced file URLs as it
/// goes. The collected URLs feed the asset localizer; embed and video URLs
/// are display-only and never collected.
pub struct BlockConverter<'a> {
    model: &'a SiteModel,
    files: Vec<String>,
}

impl<'a> BlockConverter<'a> {
    pub fn new(model: &'a SiteModel) -> Self {
        Self {
            model,
            files: Vec::new(),
        }
    }

    /// The file URLs discovered during conversion, in discovery order.
    pub fn into_files(self) -> Vec<String> {
        self.files
    }

    pub fn convert_all(&mut self, blocks: &[Block]) -> String {
        let mut out = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
        for block in blocks {
            out.push_str(&self.convert(block, 0));
        }
        out
    }

    fn convert(&mut self, block: &Block, depth: usize) -> String {
        if let Block::Paragraph(b) = block {
            if !b.common.has_children && b.payload.text.is_empty() {
                return format!("{}\n\n", FORCED_BREAK);
            }
        }

        if let Block::ChildPage(b) | Block::ChildDatabase(b) | Block::ChildEntry(b) = block {
            return self.reference_link(&b.common.id, block.block_type());
        }

        let mut outcome = format!("{}\n\n", self.format_block(block));

        if let Block::Code(_) = block {
            // Interior newlines of the fenced block carry the current
            // indentation so nested code stays inside its list item.
            let reindented = outcome
                .trim_end_matches('\n')
                .replace('\n', &format!("\n{}", "\t".repeat(depth)));
            outcome = reindented;
            outcome.push_str("\n\n");
        }

        if block.has_children() {
            if let Block::Table(b) = block {
                outcome = self.render_table(&b.common.children);
            } else {
                let child_depth = depth + 1;
                for child in block.children() {
                    let fragment = self.convert(child, child_depth);
                    outcome.push_str(&"\t".repeat(child_depth));
                    outcome.push_str(&fragment);
                }
            }
        }

        outcome
    }

    fn format_block(&mut self, block: &Block) -> String {
        match block {
            Block::Paragraph(b) => render_rich_text(&b.payload.text),
            Block::Heading1(b) => format!("# {}", render_rich_text(&b.payload.text)),
            Block::Heading2(b) => format!("## {}", render_rich_text(&b.payload.text)),
            Block::Heading3(b) => format!("### {}", render_rich_text(&b.payload.text)),
            Block::Callout(b) => {
                let emoji = b
                    .payload
                    .icon
                    .as_ref()
                    .and_then(Icon::emoji)
                    .unwrap_or_default();
                format!("{} {}", emoji, render_rich_text(&b.payload.text))
            }
            Block::Quote(b) => format!("> {}", render_rich_text(&b.payload.text)),
            // Toggles render as bullets; their fold state has no markdown form.
            Block::Toggle(b) | Block::BulletedListItem(b) => {
                format!("* {}", render_rich_text(&b.payload.text))
            }
            // Markdown renderers renumber; the literal ordinal is irrelevant.
            Block::NumberedListItem(b) => format!("1. {}", render_rich_text(&b.payload.text)),
            Block::ToDo(b) => {
                let marker = if b.payload.checked { "[x]" } else { "[ ]" };
                format!("- {} {}", marker, render_rich_text(&b.payload.text))
            }
            Block::Code(b) => format!(
                "```{}\n{}\n```",
                b.payload.language.replace(' ', "_"),
                render_rich_text(&b.payload.text)
            ),
            Block::Embed(b) => embedded_frame(&b.payload.url),
            Block::Video(b) => embedded_frame(b.payload.source.url()),
            Block::Image(b) => {
                let url = b.payload.source.url().to_string();
                self.files.push(url.clone());
                format!("![{}]({})", render_rich_text(&b.payload.caption), url)
            }
            Block::Bookmark(b) => {
                self.files.push(b.payload.url.clone());
                format!(
                    "![{}]({})",
                    render_rich_text(&b.payload.caption),
                    b.payload.url
                )
            }
            Block::File(b) => {
                let url = b.payload.source.url().to_string();
                self.files.push(url.clone());
                format!("[📎 {}]({})", file_basename(&url), url)
            }
            Block::Equation(b) => format!("$$ {} $$", b.payload.expression),
            Block::Divider(_) => "---".to_string(),
            Block::TableRow(b) => {
                let cells: Vec<String> = b
                    .payload
                    .cells
                    .iter()
                    .map(|cell| render_rich_text(cell))
                    .collect();
                format!(" | {} | ", cells.join(" | "))
            }
            // Childless tables have nothing to render.
            Block::Table(_) => format!("[{} is not supported]", block.block_type()),
            Block::Unsupported(b) => format!("[{} is not supported]", b.payload.block_type),
            // Reference blocks are handled before dispatch.
            Block::ChildPage(_) | Block::ChildDatabase(_) | Block::ChildEntry(_) => String::new(),
        }
    }

    fn reference_link(&self, id: &EntityId, kind: &str) -> String {
        let entity = match self.model.pages.get(id) {
            Some(entity) => entity,
            None => {
                log::warn!("Block references unknown entity '{}'", id);
                return format!("[{} is not supported]\n\n", kind);
            }
        };

        let title = entity.title.as_deref().unwrap_or("Untitled");
        let url = entity.url.as_deref().unwrap_or_default();
        if let Some(emoji) = &entity.emoji {
            format!("[{} {}]({})\n\n", emoji, title, url)
        } else if let Some(icon) = &entity.icon {
            format!(
                "[<span class=\"miniicon\"> <img src=\"{}\"></span> {}]({})\n\n",
                icon, title, url
            )
        } else {
            format!("[{}]({})\n\n", title, url)
        }
    }

    /// Collects table_row children into pipe-delimited markdown. The first
    /// row is the header, followed by a dash separator with one column per
    /// header cell.
    fn render_table(&mut self, children: &[Block]) -> String {
        let rows: Vec<Vec<String>> = children
            .iter()
            .filter_map(|child| match child {
                Block::TableRow(row) => Some(
                    row.payload
                        .cells
                        .iter()
                        .map(|cell| render_rich_text(cell))
                        .collect(),
                ),
                _ => None,
            })
            .collect();

        let mut out = String::new();
        for (index, row) in rows.iter().enumerate() {
            out.push_str(&format!(" | {} | \n", row.join(" | ")));
            if index == 0 {
                out.push_str(&format!(" | {} | \n", vec!["----"; row.len()].join(" | ")));
            }
        }
        out.push('\n');
        out
    }
}

fn embedded_frame(url: &str) -> String {
    format!(
        "<p><div class=\"res_emb_block\">\n<iframe width=\"640\" height=\"480\" src=\"{}\" frameborder=\"0\" allowfullscreen></iframe>\n</div></p>",
        url
    )
}

/// Query-stripped basename of a URL, used as the display name of file links.
fn file_basename(url: &str) -> String {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    path.rsplit('/').next().unwrap_or_default().to_string()
}
