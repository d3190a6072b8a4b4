// src/lib.rs
//! notion2site library — structures a fetched Notion workspace into a static
//! site model: titles, hierarchy, URLs, markdown bodies, localized assets,
//! and date ordering.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `AssetFetchFailure`, `ValidationError`
//! - **Configuration** — `CommandLineInput`, `SiteConfig`
//! - **Raw input contract** — `RawContent`, `RawNode`, `Block`, `PropertyValue`
//! - **Site model** — `SiteModel`, `Entity`, `EntityKind` and the structuring passes
//! - **Formatting** — `render_rich_text`, `BlockConverter`, `group_list_lines`
//! - **Output** — JSON intermediates and markdown page writing

mod assets;
mod config;
mod constants;
mod error;
mod formatting;
mod model;
mod output;
mod pipeline;
mod site;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, AssetFetchFailure, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, SiteConfig};

// --- Raw Input Contract ---
pub use crate::model::{
    Block, BlockCommon, BlockNode, FileRef, Icon, PropertyValue, RawContent, RawNode, RawParent,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, EntityId, EquationData, LinkData, MentionData, MentionType, RichTextItem,
    RichTextKind, TextData,
};

// --- Site Model & Structuring Passes ---
pub use crate::site::{
    assign_urls, build_year_index, find_list_style_databases, parse_family_lines, parse_headers,
    parse_notion_date, sort_database_children, Entity, EntityKind, SiteModel,
};

// --- Formatting ---
pub use crate::formatting::{
    assemble_markdown, group_list_lines, render_rich_text, translate_properties, BlockConverter,
};

// --- Assets ---
pub use crate::assets::localize_assets;

// --- Output ---
pub use crate::output::{
    load_raw_content, load_site_model, render_front_matter, write_markdown_pages, write_site_model,
};

// --- Pipeline ---
pub use crate::pipeline::structurize;
