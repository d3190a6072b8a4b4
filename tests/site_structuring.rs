// tests/site_structuring.rs
//! End-to-end structuring scenarios over small raw content documents.

use notion2site::{structurize, EntityId, EntityKind, RawContent, SiteConfig};
use pretty_assertions::assert_eq;
use serde_json::json;

fn config() -> SiteConfig {
    SiteConfig {
        raw_content: "notion_content.json".into(),
        structured_content: "notion_structured.json".into(),
        output_dir: "/tmp/notion2site-test".into(),
        site_url: "https://example.org".to_string(),
        root_id: None,
        download_files: false,
        verbose: false,
    }
}

fn raw(value: serde_json::Value) -> RawContent {
    serde_json::from_value(value).unwrap()
}

fn title_property(title: &str) -> serde_json::Value {
    json!({"type": "title", "title": [{"type": "text", "text": {"content": title}, "plain_text": title}]})
}

#[tokio::test]
async fn root_with_dated_database_builds_urls_list_style_and_year_index() {
    let raw = raw(json!({
        "root": {
            "object": "page",
            "parent": {"type": "workspace", "workspace": true},
            "properties": {"title": title_property("My Site")},
            "last_edited_time": "2022-01-01T00:00:00.000Z",
            "blocks": [
                {"id": "db", "type": "child_database", "has_children": false, "child_database": {"title": "Posts"}}
            ]
        },
        "db": {
            "object": "database",
            "parent": {"type": "page_id", "page_id": "root"},
            "title": [{"type": "text", "text": {"content": "Posts"}, "plain_text": "Posts"}],
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        },
        "jan": {
            "object": "page",
            "parent": {"type": "database_id", "database_id": "db"},
            "properties": {
                "Name": title_property("January Post"),
                "Date": {"type": "date", "date": {"start": "2021-01-01"}}
            },
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        },
        "jun": {
            "object": "page",
            "parent": {"type": "database_id", "database_id": "db"},
            "properties": {
                "Name": title_property("June Post"),
                "Date": {"type": "date", "date": {"start": "2021-06-01"}}
            },
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        }
    }));

    let model = structurize(&raw, &config()).await.unwrap();

    // No covers anywhere, so the database is demoted to list style.
    let db = &model.pages[&EntityId::from("db")];
    assert_eq!(db.kind, EntityKind::Database);
    assert!(db.list_style);

    // Root URL is the site base; children slug from titles beneath it.
    assert_eq!(
        model.pages[&EntityId::from("root")].url.as_deref(),
        Some("https://example.org")
    );
    assert_eq!(
        db.url.as_deref(),
        Some("https://example.org/Posts")
    );
    assert_eq!(
        model.pages[&EntityId::from("jan")].url.as_deref(),
        Some("https://example.org/Posts/January_Post")
    );

    // Database children re-sorted ascending by date.
    assert_eq!(
        db.children,
        vec![EntityId::from("jan"), EntityId::from("jun")]
    );

    // Year index: one year, descending dates within it.
    let years: Vec<i32> = model.sorted_id_by_year.keys().copied().collect();
    assert_eq!(years, vec![2021]);
    assert_eq!(
        model.sorted_id_by_year[&2021],
        vec![EntityId::from("jun"), EntityId::from("jan")]
    );

    // Root body links the database through its assigned title and URL.
    assert_eq!(
        model.pages[&EntityId::from("root")].markdown,
        "[Posts](https://example.org/Posts)\n"
    );
}

#[tokio::test]
async fn sibling_title_collisions_disambiguate_with_suffix() {
    let raw = raw(json!({
        "root": {
            "object": "page",
            "parent": {"type": "workspace", "workspace": true},
            "properties": {"title": title_property("Root")},
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        },
        "n1": {
            "object": "page",
            "parent": {"type": "page_id", "page_id": "root"},
            "properties": {"title": title_property("Notes")},
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        },
        "n2": {
            "object": "page",
            "parent": {"type": "page_id", "page_id": "root"},
            "properties": {"title": title_property("Notes")},
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        }
    }));

    let model = structurize(&raw, &config()).await.unwrap();

    assert_eq!(
        model.pages[&EntityId::from("n1")].url.as_deref(),
        Some("https://example.org/Notes")
    );
    assert_eq!(
        model.pages[&EntityId::from("n2")].url.as_deref(),
        Some("https://example.org/Notes_")
    );
    assert!(model
        .urls
        .contains(&"https://example.org/Notes".to_string()));
    assert!(model
        .urls
        .contains(&"https://example.org/Notes_".to_string()));
    assert_eq!(model.urls.len(), 3);
}

#[tokio::test]
async fn dated_entries_across_years_group_descending() {
    let raw = raw(json!({
        "db": {
            "object": "database",
            "parent": {"type": "workspace", "workspace": true},
            "title": [{"type": "text", "text": {"content": "Archive"}, "plain_text": "Archive"}],
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        },
        "a": {
            "object": "page",
            "parent": {"type": "database_id", "database_id": "db"},
            "properties": {
                "Name": title_property("A"),
                "Date": {"type": "date", "date": {"start": "2021-03-01"}}
            },
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        },
        "b": {
            "object": "page",
            "parent": {"type": "database_id", "database_id": "db"},
            "properties": {
                "Name": title_property("B"),
                "Date": {"type": "date", "date": {"start": "2021-09-01"}}
            },
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        },
        "c": {
            "object": "page",
            "parent": {"type": "database_id", "database_id": "db"},
            "properties": {
                "Name": title_property("C"),
                "Date": {"type": "date", "date": {"start": "2022-02-01"}}
            },
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        }
    }));

    let model = structurize(&raw, &config()).await.unwrap();

    let years: Vec<i32> = model.sorted_id_by_year.keys().copied().collect();
    assert_eq!(years, vec![2022, 2021]);
    assert_eq!(model.sorted_id_by_year[&2022], vec![EntityId::from("c")]);
    assert_eq!(
        model.sorted_id_by_year[&2021],
        vec![EntityId::from("b"), EntityId::from("a")]
    );
}

#[tokio::test]
async fn database_entry_properties_render_into_front_matter_values() {
    let raw = raw(json!({
        "db": {
            "object": "database",
            "parent": {"type": "workspace", "workspace": true},
            "title": [{"type": "text", "text": {"content": "Posts"}, "plain_text": "Posts"}],
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        },
        "entry": {
            "object": "page",
            "parent": {"type": "database_id", "database_id": "db"},
            "properties": {
                "Name": title_property("Entry"),
                "Tags": {"type": "multi_select", "multi_select": [{"name": "rust"}, {"name": "web"}]},
                "Date": {"type": "date", "date": {"start": "2021-06-01"}},
                "Done": {"type": "checkbox", "checkbox": true}
            },
            "last_edited_time": "2022-01-01T00:00:00.000Z"
        }
    }));

    let model = structurize(&raw, &config()).await.unwrap();

    let entry = &model.pages[&EntityId::from("entry")];
    assert_eq!(entry.properties_md["Tags"], "rust; web");
    assert_eq!(entry.properties_md["Date"], "01 Jun, 2021");
    assert_eq!(entry.properties_md["Done"], "- [x]");
    // The title property never appears among rendered properties.
    assert!(!entry.properties_md.contains_key("Name"));
}

#[tokio::test]
async fn page_body_with_table_and_lists_comes_out_grouped() {
    let raw = raw(json!({
        "root": {
            "object": "page",
            "parent": {"type": "workspace", "workspace": true},
            "properties": {"title": title_property("Root")},
            "last_edited_time": "2022-01-01T00:00:00.000Z",
            "blocks": [
                {"id": "b1", "type": "bulleted_list_item", "has_children": false,
                 "bulleted_list_item": {"text": [{"type": "text", "text": {"content": "one"}, "plain_text": "one"}]}},
                {"id": "b2", "type": "bulleted_list_item", "has_children": false,
                 "bulleted_list_item": {"text": [{"type": "text", "text": {"content": "two"}, "plain_text": "two"}]}},
                {"id": "t", "type": "table", "has_children": true, "table": {},
                 "children": [
                    {"id": "r1", "type": "table_row", "table_row": {"cells": [
                        [{"type": "text", "text": {"content": "H1"}, "plain_text": "H1"}],
                        [{"type": "text", "text": {"content": "H2"}, "plain_text": "H2"}]
                    ]}},
                    {"id": "r2", "type": "table_row", "table_row": {"cells": [
                        [{"type": "text", "text": {"content": "a"}, "plain_text": "a"}],
                        [{"type": "text", "text": {"content": "b"}, "plain_text": "b"}]
                    ]}}
                 ]}
            ]
        }
    }));

    let model = structurize(&raw, &config()).await.unwrap();

    let body = &model.pages[&EntityId::from("root")].markdown;
    assert!(body.starts_with("* one\n* two\n"));
    assert!(body.contains(" | H1 | H2 | \n | ---- | ---- | \n | a | b | "));
}
