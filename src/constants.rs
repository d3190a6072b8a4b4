// src/constants.rs
//! Domain constants that define the operational boundaries of the system.

/// Default filename for the raw content document produced by the fetch layer.
pub const RAW_CONTENT_FILE: &str = "notion_content.json";

/// Default filename for the persisted structured site model.
pub const STRUCTURED_CONTENT_FILE: &str = "notion_structured.json";

/// How many asset downloads may be in flight at once per entity.
///
/// Downloads for a single entity are independent of each other; the rewrite
/// step that follows them is applied only after they all settle, so this
/// bound affects throughput, not correctness.
pub const DOWNLOAD_CONCURRENCY: usize = 8;

/// Estimated characters per block, used to pre-allocate output strings.
///
/// A performance hint, not a constraint. Over-estimating wastes a little
/// memory; under-estimating causes reallocation.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;
