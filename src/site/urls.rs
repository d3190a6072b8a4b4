// src/site/urls.rs
//! Pre-order URL assignment with deterministic collision resolution.

use super::SiteModel;
use crate::error::{AppError, Result};
use crate::types::EntityId;

/// Assigns a unique URL to every entity, starting at the root.
///
/// The root gets the site base verbatim; every other entity gets its parent's
/// URL joined with a slug of its title. A collision against the global `urls`
/// accumulator appends `_` to the slug and retries; each retry strictly
/// lengthens the slug, so assignment always terminates.
pub fn assign_urls(model: &mut SiteModel, site_url: &str) -> Result<()> {
    let root = model.root.clone();
    assign_recursive(model, &root, site_url)?;
    log::debug!("Assigned {} urls", model.urls.len());
    Ok(())
}

fn assign_recursive(model: &mut SiteModel, id: &EntityId, site_url: &str) -> Result<()> {
    let url = if *id == model.root {
        site_url.to_string()
    } else {
        let entity = model.entity(id)?;
        let parent_id = entity.parent.clone().ok_or_else(|| {
            AppError::MalformedContent(format!("non-root entity '{}' has no parent", id))
        })?;
        let title = entity
            .title
            .clone()
            .ok_or_else(|| AppError::MissingTitle { id: id.clone() })?;
        let parent_url = model.entity(&parent_id)?.url_or_err(&parent_id)?.to_string();

        let mut slug = slugify(&title);
        let mut candidate = format!("{}/{}", parent_url, slug);
        while model.urls.contains(&candidate) {
            slug.push('_');
            candidate = format!("{}/{}", parent_url, slug);
        }
        candidate
    };

    model.entity_mut(id)?.url = Some(url.clone());
    model.urls.push(url);

    let children = model.entity(id)?.children.clone();
    for child_id in children {
        assign_recursive(model, &child_id, site_url)?;
    }
    Ok(())
}

/// Title → path segment. Spaces become underscores; everything else passes
/// through unchanged.
fn slugify(title: &str) -> String {
    title.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{Entity, EntityKind};
    use indexmap::IndexMap;

    fn entity(kind: EntityKind, title: &str, parent: Option<&str>) -> Entity {
        let mut e = Entity::new(kind);
        e.title = Some(title.to_string());
        e.parent = parent.map(EntityId::from);
        e
    }

    fn model_with(pages: Vec<(&str, Entity)>) -> SiteModel {
        let mut map = IndexMap::new();
        let root = EntityId::from(pages[0].0);
        for (id, entity) in pages {
            map.insert(EntityId::from(id), entity);
        }
        // back-link children from parents
        let ids: Vec<EntityId> = map.keys().cloned().collect();
        for id in ids {
            if let Some(parent) = map[&id].parent.clone() {
                map.get_mut(&parent).unwrap().children.push(id);
            }
        }
        SiteModel {
            root,
            pages: map,
            urls: Vec::new(),
            sorted_id_by_year: IndexMap::new(),
        }
    }

    #[test]
    fn root_gets_site_base_and_children_get_slugged_paths() {
        let mut model = model_with(vec![
            ("root", entity(EntityKind::Page, "My Site", None)),
            ("child", entity(EntityKind::Page, "About Me", Some("root"))),
        ]);

        assign_urls(&mut model, "https://example.org").unwrap();

        assert_eq!(
            model.pages[&EntityId::from("root")].url.as_deref(),
            Some("https://example.org")
        );
        assert_eq!(
            model.pages[&EntityId::from("child")].url.as_deref(),
            Some("https://example.org/About_Me")
        );
    }

    #[test]
    fn sibling_title_collision_appends_suffix_until_unique() {
        let mut model = model_with(vec![
            ("root", entity(EntityKind::Page, "Root", None)),
            ("a", entity(EntityKind::Page, "Notes", Some("root"))),
            ("b", entity(EntityKind::Page, "Notes", Some("root"))),
            ("c", entity(EntityKind::Page, "Notes", Some("root"))),
        ]);

        assign_urls(&mut model, "https://example.org").unwrap();

        assert_eq!(
            model.pages[&EntityId::from("a")].url.as_deref(),
            Some("https://example.org/Notes")
        );
        assert_eq!(
            model.pages[&EntityId::from("b")].url.as_deref(),
            Some("https://example.org/Notes_")
        );
        assert_eq!(
            model.pages[&EntityId::from("c")].url.as_deref(),
            Some("https://example.org/Notes__")
        );
        assert_eq!(model.urls.len(), 4);
    }

    #[test]
    fn urls_are_pairwise_distinct_in_preorder() {
        let mut model = model_with(vec![
            ("root", entity(EntityKind::Page, "Root", None)),
            ("a", entity(EntityKind::Page, "A", Some("root"))),
            ("aa", entity(EntityKind::Page, "Sub", Some("a"))),
            ("b", entity(EntityKind::Page, "B", Some("root"))),
        ]);

        assign_urls(&mut model, "https://example.org").unwrap();

        let mut seen = std::collections::HashSet::new();
        for url in &model.urls {
            assert!(seen.insert(url.clone()), "duplicate url {}", url);
        }
        // pre-order: root, a, aa, b
        assert_eq!(
            model.urls,
            vec![
                "https://example.org",
                "https://example.org/A",
                "https://example.org/A/Sub",
                "https://example.org/B",
            ]
        );
    }

    #[test]
    fn missing_title_surfaces_an_error() {
        let mut untitled = Entity::new(EntityKind::Page);
        untitled.parent = Some(EntityId::from("root"));
        let mut model = model_with(vec![("root", entity(EntityKind::Page, "Root", None))]);
        model
            .pages
            .insert(EntityId::from("bad"), untitled);
        model
            .pages
            .get_mut(&EntityId::from("root"))
            .unwrap()
            .children
            .push(EntityId::from("bad"));

        let err = assign_urls(&mut model, "https://example.org").unwrap_err();
        assert!(matches!(err, AppError::MissingTitle { .. }));
    }
}
