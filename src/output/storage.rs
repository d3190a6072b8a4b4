// src/output/storage.rs
//! JSON persistence of the two pipeline intermediates.
//!
//! The raw content document is written by the fetch layer and read here; the
//! structured site model is written after structuring. Both files make the
//! run resumable: an existing raw document skips the fetch entirely.

use crate::error::{AppError, Result};
use crate::model::RawContent;
use crate::site::SiteModel;
use std::fs;
use std::path::Path;

pub fn load_raw_content(path: &Path) -> Result<RawContent> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| AppError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_site_model(path: &Path) -> Result<SiteModel> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| AppError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_site_model(path: &Path, model: &SiteModel) -> Result<()> {
    let text = serde_json::to_string_pretty(model).map_err(|source| AppError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text)?;
    log::debug!("Persisted site model to {}", path.display());
    Ok(())
}
