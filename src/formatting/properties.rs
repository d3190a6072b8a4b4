// src/formatting/properties.rs
//! Database property values rendered as markdown snippets.

use super::rich_text::render_rich_text;
use crate::error::Result;
use crate::model::{PropertyValue, RawContent};
use crate::site::{parse_notion_date, EntityKind, SiteModel};
use crate::types::EntityId;

/// Copies every database entry's property bag into the model and renders its
/// markdown counterpart, keyed by the same property names in the same order.
///
/// The title property is skipped (the entity already carries it); file
/// property URLs also register into the entry's `files` list so the localizer
/// picks them up.
pub fn translate_properties(raw: &RawContent, model: &mut SiteModel) -> Result<()> {
    let entries: Vec<EntityId> = model
        .pages
        .iter()
        .filter(|(_, e)| e.kind == EntityKind::DatabaseEntry)
        .map(|(id, _)| id.clone())
        .collect();

    for id in entries {
        let Some(node) = raw.get(&id) else { continue };

        let mut discovered_files = Vec::new();
        let mut properties_md = indexmap::IndexMap::new();
        for (name, property) in &node.properties {
            if matches!(property, PropertyValue::Title { .. }) {
                continue;
            }
            if let PropertyValue::Files { files } = property {
                for file in files {
                    discovered_files.push(file.source.url().to_string());
                }
            }
            properties_md.insert(name.clone(), render_property(name, property));
        }

        let entry = model.entity_mut(&id)?;
        entry.properties = node.properties.clone();
        entry.properties_md = properties_md;
        entry.files.extend(discovered_files);
    }

    log::debug!("Translated database entry properties");
    Ok(())
}

fn render_property(name: &str, property: &PropertyValue) -> String {
    match property {
        PropertyValue::RichText { rich_text } => render_rich_text(rich_text),
        PropertyValue::Number { number } => (*number).map(format_number).unwrap_or_default(),
        PropertyValue::Select { select } => select
            .as_ref()
            .map(|option| option.name.clone())
            .unwrap_or_default(),
        PropertyValue::MultiSelect { multi_select } => multi_select
            .iter()
            .map(|option| option.name.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        PropertyValue::Date { date } => match date {
            Some(date) => {
                let mut rendered = format_date(&date.start);
                if let Some(end) = &date.end {
                    rendered.push_str(" - ");
                    rendered.push_str(&format_date(end));
                }
                rendered
            }
            None => String::new(),
        },
        PropertyValue::People { people } => people
            .iter()
            .filter_map(|person| person.name.as_deref())
            .collect::<Vec<_>>()
            .join("; "),
        PropertyValue::Files { files } => files
            .iter()
            .map(|file| format!("[📎]({})", file.source.url()))
            .collect::<Vec<_>>()
            .join("; "),
        PropertyValue::Checkbox { checkbox } => {
            if *checkbox {
                "- [x]".to_string()
            } else {
                "- [ ]".to_string()
            }
        }
        PropertyValue::Url { url } => url
            .as_ref()
            .map(|url| format!("[🕸]({})", url))
            .unwrap_or_default(),
        PropertyValue::Email { email } => email.clone().unwrap_or_default(),
        PropertyValue::PhoneNumber { phone_number } => phone_number.clone().unwrap_or_default(),
        PropertyValue::CreatedTime { created_time } => format_date(created_time),
        PropertyValue::LastEditedTime { last_edited_time } => format_date(last_edited_time),
        PropertyValue::Title { .. } => String::new(),
        PropertyValue::Unsupported { property_type } => {
            log::debug!("Property '{}' of type {} is not supported", name, property_type);
            String::new()
        }
    }
}

/// Numbers stringify as integers when whole, decimals otherwise.
fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.is_finite() {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// "01 Jun, 2021"-style date, or the raw string when unparseable.
fn format_date(value: &str) -> String {
    match parse_notion_date(value) {
        Some(instant) => instant.format("%d %b, %Y").to_string(),
        None => value.to_string(),
    }
}
