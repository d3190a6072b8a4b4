// src/site/mod.rs
//! The structured site model and the passes that build it.
//!
//! One [`Entity`] per page, database, or database entry. The header parser
//! creates every entity in a single pass; every later stage enriches the
//! model in place and never creates or deletes entities.

mod headers;
mod ordering;
mod urls;

pub use headers::{find_list_style_databases, parse_family_lines, parse_headers};
pub use ordering::{build_year_index, sort_database_children};
pub use urls::assign_urls;

use crate::error::{AppError, Result};
use crate::model::PropertyValue;
use crate::types::EntityId;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Entity classification within the content hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "page")]
    Page,
    #[serde(rename = "database")]
    Database,
    #[serde(rename = "db_entry")]
    DatabaseEntry,
}

/// One normalized record per page, database, or database entry.
///
/// Fields are populated stage by stage: the header parser fills everything
/// except `url`, `markdown`, and `properties_md`; those are filled by the
/// URL assigner, the markdown assembler, and the property translator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// Absent for malformed database entries; a warning is logged when so.
    pub title: Option<String>,
    /// Absent only for the root.
    pub parent: Option<EntityId>,
    /// Insertion order from the raw document, except where re-sorted by date.
    pub children: Vec<EntityId>,
    pub last_edited_time: String,
    /// ISO date of the `Date` property start. Database entries only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_end: Option<String>,
    pub cover: Option<String>,
    pub icon: Option<String>,
    pub emoji: Option<String>,
    /// Remote asset URLs in discovery order; rewritten to local paths by the
    /// localizer. Duplicates possible.
    #[serde(default)]
    pub files: Vec<String>,
    /// Assigned exactly once by the URL assigner, immutable thereafter.
    pub url: Option<String>,
    /// Assembled markdown body; mutated afterward only by the asset rewrite.
    #[serde(default)]
    pub markdown: String,
    /// Raw typed property bag. Database entries only.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, PropertyValue>,
    /// Rendered markdown counterpart of `properties`, same keys, same order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties_md: IndexMap<String, String>,
    /// Ancestor chain from the root down to the direct parent.
    #[serde(default)]
    pub family_line: Vec<EntityId>,
    /// Databases only: true when any child lacks a cover, which demotes the
    /// database from gallery to list presentation.
    #[serde(default)]
    pub list_style: bool,
}

impl Entity {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            title: None,
            parent: None,
            children: Vec::new(),
            last_edited_time: String::new(),
            date: None,
            date_end: None,
            cover: None,
            icon: None,
            emoji: None,
            files: Vec::new(),
            url: None,
            markdown: String::new(),
            properties: IndexMap::new(),
            properties_md: IndexMap::new(),
            family_line: Vec::new(),
            list_style: false,
        }
    }

    /// The entity's URL, or an error if the hierarchy pass has not run yet.
    pub fn url_or_err(&self, id: &EntityId) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| AppError::UnassignedUrl { id: id.clone() })
    }
}

/// The shared site model, mutated in place by each stage in turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteModel {
    pub root: EntityId,
    pub pages: IndexMap<EntityId, Entity>,
    /// Every assigned URL, in pre-order assignment order. The collision check
    /// during assignment is a membership test against this list.
    #[serde(default)]
    pub urls: Vec<String>,
    /// Year → dated entity IDs, years descending, each year's list sorted
    /// descending by full date.
    #[serde(default)]
    pub sorted_id_by_year: IndexMap<i32, Vec<EntityId>>,
}

impl SiteModel {
    pub fn entity(&self, id: &EntityId) -> Result<&Entity> {
        self.pages.get(id).ok_or_else(|| {
            AppError::MalformedContent(format!("unknown entity '{}' referenced", id))
        })
    }

    pub fn entity_mut(&mut self, id: &EntityId) -> Result<&mut Entity> {
        self.pages.get_mut(id).ok_or_else(|| {
            AppError::MalformedContent(format!("unknown entity '{}' referenced", id))
        })
    }
}

/// Parses a source-system timestamp into a comparable instant.
///
/// The source emits both bare dates (`2022-01-01`) and full RFC 3339
/// timestamps (`2022-01-25T22:35:00.000Z`); bare dates count as midnight.
pub fn parse_notion_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_dates_and_full_timestamps() {
        let bare = parse_notion_date("2022-01-01").unwrap();
        let full = parse_notion_date("2022-01-01T10:30:00.000Z").unwrap();
        assert!(bare < full);
        assert_eq!(bare.date().to_string(), "2022-01-01");
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_notion_date("not a date").is_none());
        assert!(parse_notion_date("").is_none());
    }
}
