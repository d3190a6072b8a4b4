// src/site/headers.rs
//! Header parsing: one pass over the raw document producing the initial
//! entity map, plus the family-line and list-style passes that follow it.

use super::{Entity, EntityKind, SiteModel};
use crate::error::{AppError, Result};
use crate::model::{RawContent, RawNode};
use crate::types::{EntityId, RichTextItem, RichTextKind};
use indexmap::IndexMap;

/// Builds the initial entity map from the raw content document.
///
/// Classification, titles, timestamps, dates, covers, and icons are filled
/// here; children are back-linked in a second sweep so the raw document may
/// list entities in any order. A parent reference that resolves to nothing
/// is fatal: the hierarchy invariant cannot be satisfied without it.
pub fn parse_headers(raw: &RawContent, explicit_root: Option<&EntityId>) -> Result<SiteModel> {
    let root = resolve_root(raw, explicit_root)?;

    let mut pages: IndexMap<EntityId, Entity> = IndexMap::with_capacity(raw.len());
    for (id, node) in raw {
        pages.insert(id.clone(), parse_one_header(id, node));
    }

    // Back-link children in document order.
    for (id, node) in raw {
        if let Some(parent_id) = node.parent.id() {
            let parent = pages.get_mut(parent_id).ok_or_else(|| AppError::MissingParent {
                id: id.clone(),
                parent: parent_id.clone(),
            })?;
            parent.children.push(id.clone());
        }
    }

    log::debug!("Structured headers for {} entities", pages.len());

    Ok(SiteModel {
        root,
        pages,
        urls: Vec::new(),
        sorted_id_by_year: IndexMap::new(),
    })
}

fn resolve_root(raw: &RawContent, explicit_root: Option<&EntityId>) -> Result<EntityId> {
    if let Some(root) = explicit_root {
        if !raw.contains_key(root) {
            return Err(AppError::MalformedContent(format!(
                "root entity '{}' is not present in the raw content",
                root
            )));
        }
        return Ok(root.clone());
    }

    let first = raw.keys().next().ok_or_else(|| {
        AppError::MalformedContent("raw content document contains no entities".to_string())
    })?;
    log::debug!(
        "No explicit root given; using first raw entry '{}' as root",
        first
    );
    Ok(first.clone())
}

fn parse_one_header(id: &EntityId, node: &RawNode) -> Entity {
    // Entries parented by a database are database entries regardless of
    // their declared object kind.
    let kind = if node.parent.is_database() {
        EntityKind::DatabaseEntry
    } else if node.object == "database" {
        EntityKind::Database
    } else {
        EntityKind::Page
    };

    let mut entity = Entity::new(kind);
    entity.title = extract_title(id, node, kind);
    entity.last_edited_time = node.last_edited_time.clone();
    entity.parent = node.parent.id().cloned();

    if kind == EntityKind::DatabaseEntry {
        if let Some(date) = node.properties.get("Date").and_then(|p| p.as_date()) {
            entity.date = Some(date.start.clone());
            entity.date_end = date.end.clone();
        }
    }

    if let Some(cover) = &node.cover {
        let url = cover.url().to_string();
        entity.files.push(url.clone());
        entity.cover = Some(url);
    }

    match &node.icon {
        Some(icon) => {
            if let Some(emoji) = icon.emoji() {
                entity.emoji = Some(emoji.to_string());
            } else if let Some(url) = icon.url() {
                entity.files.push(url.to_string());
                entity.icon = Some(url.to_string());
            }
        }
        None => {}
    }

    entity
}

/// Kind-specific title extraction.
///
/// Pages carry a `title` property; databases carry a top-level rich text
/// list; database entries carry a property of type title under an arbitrary
/// name (the first such property in insertion order wins).
fn extract_title(id: &EntityId, node: &RawNode, kind: EntityKind) -> Option<String> {
    match kind {
        EntityKind::Page => node
            .properties
            .get("title")
            .and_then(|p| p.as_title())
            .and_then(first_plain_text),
        EntityKind::Database => database_title(&node.title),
        EntityKind::DatabaseEntry => {
            let title = node
                .properties
                .values()
                .find_map(|p| p.as_title())
                .and_then(first_plain_text);
            if title.is_none() {
                log::warn!(
                    "Database entry '{}' has no title; this will break URL assignment",
                    id
                );
            }
            title
        }
    }
}

fn first_plain_text(items: &[RichTextItem]) -> Option<String> {
    items.first().map(|item| item.plain_text.clone())
}

fn database_title(items: &[RichTextItem]) -> Option<String> {
    items.first().map(|item| match &item.kind {
        RichTextKind::Text { text } => text.content.clone(),
        _ => item.plain_text.clone(),
    })
}

/// Computes every entity's ancestor chain, root first.
pub fn parse_family_lines(model: &mut SiteModel) -> Result<()> {
    let ids: Vec<EntityId> = model.pages.keys().cloned().collect();
    for id in &ids {
        let mut line: Vec<EntityId> = Vec::new();
        let mut cursor = model.entity(id)?.parent.clone();
        while let Some(parent_id) = cursor {
            if line.len() > model.pages.len() {
                return Err(AppError::ParentCycle { id: id.clone() });
            }
            cursor = model.entity(&parent_id)?.parent.clone();
            line.insert(0, parent_id);
        }
        model.entity_mut(id)?.family_line = line;
    }
    log::debug!("Structured family lines");
    Ok(())
}

/// Demotes databases to list presentation when any child lacks a cover.
///
/// Galleries need cover images; one coverless child is enough to switch the
/// whole database to a list.
pub fn find_list_style_databases(model: &mut SiteModel) {
    let databases: Vec<EntityId> = model
        .pages
        .iter()
        .filter(|(_, e)| e.kind == EntityKind::Database)
        .map(|(id, _)| id.clone())
        .collect();

    for db_id in databases {
        let children = match model.pages.get(&db_id) {
            Some(db) => db.children.clone(),
            None => continue,
        };
        let demote = children
            .iter()
            .any(|child_id| matches!(model.pages.get(child_id), Some(child) if child.cover.is_none()));
        if demote {
            if let Some(db) = model.pages.get_mut(&db_id) {
                db.list_style = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_from_json(value: serde_json::Value) -> RawContent {
        serde_json::from_value(value).unwrap()
    }

    fn page_node(parent: serde_json::Value, title: &str) -> serde_json::Value {
        json!({
            "object": "page",
            "parent": parent,
            "properties": {
                "title": {"type": "title", "title": [{"type": "text", "text": {"content": title}, "plain_text": title}]}
            },
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        })
    }

    #[test]
    fn database_parent_reclassifies_entry() {
        let raw = raw_from_json(json!({
            "root": page_node(json!({"type": "workspace", "workspace": true}), "Root"),
            "db": {
                "object": "database",
                "parent": {"type": "page_id", "page_id": "root"},
                "title": [{"type": "text", "text": {"content": "Posts"}, "plain_text": "Posts"}],
                "last_edited_time": "2022-01-01T00:00:00.000Z"
            },
            "entry": {
                "object": "page",
                "parent": {"type": "database_id", "database_id": "db"},
                "properties": {
                    "Name": {"type": "title", "title": [{"type": "text", "text": {"content": "Hello"}, "plain_text": "Hello"}]},
                    "Date": {"type": "date", "date": {"start": "2021-06-01"}}
                },
                "last_edited_time": "2022-01-01T00:00:00.000Z"
            }
        }));

        let model = parse_headers(&raw, None).unwrap();

        let entry = &model.pages[&EntityId::from("entry")];
        assert_eq!(entry.kind, EntityKind::DatabaseEntry);
        assert_eq!(entry.title.as_deref(), Some("Hello"));
        assert_eq!(entry.date.as_deref(), Some("2021-06-01"));

        let db = &model.pages[&EntityId::from("db")];
        assert_eq!(db.kind, EntityKind::Database);
        assert_eq!(db.title.as_deref(), Some("Posts"));
        assert_eq!(db.children, vec![EntityId::from("entry")]);

        assert_eq!(model.root, EntityId::from("root"));
    }

    #[test]
    fn missing_parent_is_a_build_aborting_error() {
        let raw = raw_from_json(json!({
            "orphan": page_node(json!({"type": "page_id", "page_id": "nowhere"}), "Orphan")
        }));

        let err = parse_headers(&raw, None).unwrap_err();
        assert!(matches!(err, AppError::MissingParent { .. }));
    }

    #[test]
    fn explicit_root_must_exist() {
        let raw = raw_from_json(json!({
            "root": page_node(json!({"type": "workspace", "workspace": true}), "Root")
        }));

        assert!(parse_headers(&raw, Some(&EntityId::from("ghost"))).is_err());
        let model = parse_headers(&raw, Some(&EntityId::from("root"))).unwrap();
        assert_eq!(model.root, EntityId::from("root"));
    }

    #[test]
    fn entry_without_title_warns_and_stays_untitled() {
        let raw = raw_from_json(json!({
            "db": {
                "object": "database",
                "parent": {"type": "workspace", "workspace": true},
                "title": [{"type": "text", "text": {"content": "Posts"}, "plain_text": "Posts"}],
                "last_edited_time": "2022-01-01T00:00:00.000Z"
            },
            "entry": {
                "object": "page",
                "parent": {"type": "database_id", "database_id": "db"},
                "properties": {"Name": {"type": "title", "title": []}},
                "last_edited_time": "2022-01-01T00:00:00.000Z"
            }
        }));

        let model = parse_headers(&raw, None).unwrap();
        assert_eq!(model.pages[&EntityId::from("entry")].title, None);
    }

    #[test]
    fn cover_and_icon_urls_register_as_files() {
        let raw = raw_from_json(json!({
            "root": {
                "object": "page",
                "parent": {"type": "workspace", "workspace": true},
                "properties": {
                    "title": {"type": "title", "title": [{"type": "text", "text": {"content": "Root"}, "plain_text": "Root"}]}
                },
                "cover": {"external": {"url": "https://example.org/cover.png"}},
                "icon": {"file": {"url": "https://example.org/icon.png"}},
                "last_edited_time": "2022-01-01T00:00:00.000Z"
            }
        }));

        let model = parse_headers(&raw, None).unwrap();
        let root = &model.pages[&EntityId::from("root")];
        assert_eq!(root.cover.as_deref(), Some("https://example.org/cover.png"));
        assert_eq!(root.icon.as_deref(), Some("https://example.org/icon.png"));
        assert_eq!(root.emoji, None);
        assert_eq!(
            root.files,
            vec![
                "https://example.org/cover.png".to_string(),
                "https://example.org/icon.png".to_string()
            ]
        );
    }

    #[test]
    fn coverless_child_demotes_database_to_list_style() {
        let raw = raw_from_json(json!({
            "db": {
                "object": "database",
                "parent": {"type": "workspace", "workspace": true},
                "title": [{"type": "text", "text": {"content": "Posts"}, "plain_text": "Posts"}],
                "last_edited_time": "2022-01-01T00:00:00.000Z"
            },
            "a": {
                "object": "page",
                "parent": {"type": "database_id", "database_id": "db"},
                "properties": {"Name": {"type": "title", "title": [{"type": "text", "text": {"content": "A"}, "plain_text": "A"}]}},
                "cover": {"external": {"url": "https://example.org/a.png"}},
                "last_edited_time": "2022-01-01T00:00:00.000Z"
            },
            "b": {
                "object": "page",
                "parent": {"type": "database_id", "database_id": "db"},
                "properties": {"Name": {"type": "title", "title": [{"type": "text", "text": {"content": "B"}, "plain_text": "B"}]}},
                "last_edited_time": "2022-01-01T00:00:00.000Z"
            }
        }));

        let mut model = parse_headers(&raw, None).unwrap();
        find_list_style_databases(&mut model);
        assert!(model.pages[&EntityId::from("db")].list_style);
    }

    #[test]
    fn family_lines_run_from_root_to_parent() {
        let raw = raw_from_json(json!({
            "root": page_node(json!({"type": "workspace", "workspace": true}), "Root"),
            "mid": page_node(json!({"type": "page_id", "page_id": "root"}), "Mid"),
            "leaf": page_node(json!({"type": "page_id", "page_id": "mid"}), "Leaf")
        }));

        let mut model = parse_headers(&raw, None).unwrap();
        parse_family_lines(&mut model).unwrap();

        assert!(model.pages[&EntityId::from("root")].family_line.is_empty());
        assert_eq!(
            model.pages[&EntityId::from("leaf")].family_line,
            vec![EntityId::from("root"), EntityId::from("mid")]
        );
    }
}
