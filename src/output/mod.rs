// src/output/mod.rs
//! Boundary to disk: the persisted JSON intermediates and the rendered
//! markdown files handed to the template renderer.

mod storage;
mod writer;

pub use storage::{load_raw_content, load_site_model, write_site_model};
pub use writer::{render_front_matter, write_markdown_pages};
