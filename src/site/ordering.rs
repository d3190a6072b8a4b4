// src/site/ordering.rs
//! Date ordering: ascending sort of database children and the descending
//! year index used for archive display.

use super::{parse_notion_date, EntityKind, SiteModel};
use crate::types::EntityId;
use chrono::{Datelike, NaiveDateTime};
use indexmap::IndexMap;

/// Re-sorts database children ascending by their entry date.
///
/// Only databases with more than one child, where the first child carries a
/// date, are touched; everything else keeps raw document order. The sort is
/// stable, so entries sharing a date keep their relative order. A child
/// without a parseable date sorts before all dated siblings.
pub fn sort_database_children(model: &mut SiteModel) {
    let databases: Vec<EntityId> = model
        .pages
        .iter()
        .filter(|(_, e)| e.kind == EntityKind::Database)
        .map(|(id, _)| id.clone())
        .collect();

    for db_id in databases {
        let children = match model.pages.get(&db_id) {
            Some(db) if db.children.len() > 1 => db.children.clone(),
            _ => continue,
        };
        let first_is_dated = model
            .pages
            .get(&children[0])
            .map_or(false, |child| child.date.is_some());
        if !first_is_dated {
            continue;
        }

        let mut keyed: Vec<(Option<NaiveDateTime>, EntityId)> = children
            .into_iter()
            .map(|child_id| {
                let date = model
                    .pages
                    .get(&child_id)
                    .and_then(|child| child.date.as_deref())
                    .and_then(parse_notion_date);
                (date, child_id)
            })
            .collect();
        keyed.sort_by_key(|(date, _)| *date);

        if let Some(db) = model.pages.get_mut(&db_id) {
            db.children = keyed.into_iter().map(|(_, id)| id).collect();
        }
    }
}

/// Builds the site-wide year index: every dated entity, grouped by year.
///
/// Years appear in descending order, and each year's list is sorted
/// descending by full date (ties keep model iteration order).
pub fn build_year_index(model: &mut SiteModel) {
    let mut dated: Vec<(NaiveDateTime, EntityId)> = model
        .pages
        .iter()
        .filter_map(|(id, entity)| {
            let date = entity.date.as_deref().and_then(parse_notion_date)?;
            Some((date, id.clone()))
        })
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut index: IndexMap<i32, Vec<EntityId>> = IndexMap::new();
    for (date, id) in dated {
        index.entry(date.year()).or_default().push(id);
    }
    model.sorted_id_by_year = index;

    log::debug!(
        "Sorted pages by date and grouped into {} year(s)",
        model.sorted_id_by_year.len()
    );
}
