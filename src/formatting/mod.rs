// src/formatting/mod.rs
//! Markdown assembly: rich text rendering, block conversion, the list
//! grouping post-pass, and property translation.

mod blocks;
mod grouping;
mod properties;
mod rich_text;

pub use blocks::BlockConverter;
pub use grouping::group_list_lines;
pub use properties::translate_properties;
pub use rich_text::render_rich_text;

use crate::error::Result;
use crate::model::RawContent;
use crate::site::SiteModel;

/// Assembles every page's markdown body from its raw block list.
///
/// Conversion reads the model (reference blocks need assigned titles and
/// URLs), so each page's body and discovered file URLs are applied after
/// its conversion finishes.
pub fn assemble_markdown(raw: &RawContent, model: &mut SiteModel) -> Result<()> {
    for (id, node) in raw {
        let (body, discovered_files) = {
            let mut converter = BlockConverter::new(model);
            let body = converter.convert_all(&node.blocks);
            (body, converter.into_files())
        };

        let entity = model.entity_mut(id)?;
        entity.markdown = group_list_lines(&body);
        entity.files.extend(discovered_files);
    }

    log::debug!("Assembled markdown for {} pages", raw.len());
    Ok(())
}
