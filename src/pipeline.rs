// src/pipeline.rs
//! Stage orchestration for the structuring pipeline.
//!
//! Each stage fully completes before the next begins and is the sole writer
//! of the fields it fills; later stages only read what earlier ones wrote.

use crate::config::SiteConfig;
use crate::error::Result;
use crate::model::RawContent;
use crate::site::SiteModel;
use crate::{assets, formatting, site};

/// Transforms the raw content document into the structured site model.
///
/// Stage order: headers → list-style → family lines → URLs → markdown →
/// properties → asset localization → ordering. The markdown stage reads
/// URLs assigned by the stage before it; the localizer reads everything the
/// stages before it produced.
pub async fn structurize(raw: &RawContent, config: &SiteConfig) -> Result<SiteModel> {
    let mut model = site::parse_headers(raw, config.root_id.as_ref())?;
    site::find_list_style_databases(&mut model);
    site::parse_family_lines(&mut model)?;
    site::assign_urls(&mut model, &config.site_url)?;
    formatting::assemble_markdown(raw, &mut model)?;
    formatting::translate_properties(raw, &mut model)?;

    if config.download_files {
        assets::localize_assets(&mut model, config).await?;
        log::debug!("Downloaded files and replaced paths");
    }

    site::sort_database_children(&mut model);
    site::build_year_index(&mut model);

    Ok(model)
}
