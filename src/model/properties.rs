// src/model/properties.rs
//! Database property values.
//!
//! Properties share the discriminator convention with blocks: the `"type"`
//! field names the payload key. The deserializer dispatches on it and folds
//! unknown or malformed values into `Unsupported` so one exotic property
//! cannot sink a whole database entry.

use crate::types::RichTextItem;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichTextItem> },
    RichText { rich_text: Vec<RichTextItem> },
    Number { number: Option<f64> },
    Select { select: Option<SelectOption> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Date { date: Option<DateValue> },
    People { people: Vec<Person> },
    Files { files: Vec<PropertyFile> },
    Checkbox { checkbox: bool },
    Url { url: Option<String> },
    Email { email: Option<String> },
    PhoneNumber { phone_number: Option<String> },
    CreatedTime { created_time: String },
    LastEditedTime { last_edited_time: String },
    Unsupported { property_type: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateValue {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// A file attached through a property, either uploaded or external.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub source: super::FileRef,
}

impl PropertyValue {
    /// The raw type name, as the source system spells it.
    pub fn property_type(&self) -> &str {
        match self {
            PropertyValue::Title { .. } => "title",
            PropertyValue::RichText { .. } => "rich_text",
            PropertyValue::Number { .. } => "number",
            PropertyValue::Select { .. } => "select",
            PropertyValue::MultiSelect { .. } => "multi_select",
            PropertyValue::Date { .. } => "date",
            PropertyValue::People { .. } => "people",
            PropertyValue::Files { .. } => "files",
            PropertyValue::Checkbox { .. } => "checkbox",
            PropertyValue::Url { .. } => "url",
            PropertyValue::Email { .. } => "email",
            PropertyValue::PhoneNumber { .. } => "phone_number",
            PropertyValue::CreatedTime { .. } => "created_time",
            PropertyValue::LastEditedTime { .. } => "last_edited_time",
            PropertyValue::Unsupported { property_type } => property_type,
        }
    }

    /// The rich text items of a title property, if this is one.
    pub fn as_title(&self) -> Option<&[RichTextItem]> {
        match self {
            PropertyValue::Title { title } => Some(title),
            _ => None,
        }
    }

    /// The date payload, if this is a date property with a value.
    pub fn as_date(&self) -> Option<&DateValue> {
        match self {
            PropertyValue::Date { date } => date.as_ref(),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(property_from_value(value))
    }
}

fn property_from_value(value: Value) -> PropertyValue {
    let property_type = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    fn payload<T: serde::de::DeserializeOwned>(value: &Value, key: &str) -> Option<T> {
        let payload = value.get(key).cloned().unwrap_or(Value::Null);
        match serde_json::from_value(payload) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::debug!("Malformed '{}' property treated as unsupported: {}", key, e);
                None
            }
        }
    }

    let parsed = match property_type.as_str() {
        "title" => payload(&value, "title").map(|title| PropertyValue::Title { title }),
        "rich_text" => {
            payload(&value, "rich_text").map(|rich_text| PropertyValue::RichText { rich_text })
        }
        "number" => payload(&value, "number").map(|number| PropertyValue::Number { number }),
        "select" => payload(&value, "select").map(|select| PropertyValue::Select { select }),
        "multi_select" => payload(&value, "multi_select")
            .map(|multi_select| PropertyValue::MultiSelect { multi_select }),
        "date" => payload(&value, "date").map(|date| PropertyValue::Date { date }),
        "people" => payload(&value, "people").map(|people| PropertyValue::People { people }),
        "files" => payload(&value, "files").map(|files| PropertyValue::Files { files }),
        "checkbox" => {
            payload(&value, "checkbox").map(|checkbox| PropertyValue::Checkbox { checkbox })
        }
        "url" => payload(&value, "url").map(|url| PropertyValue::Url { url }),
        "email" => payload(&value, "email").map(|email| PropertyValue::Email { email }),
        "phone_number" => payload(&value, "phone_number")
            .map(|phone_number| PropertyValue::PhoneNumber { phone_number }),
        "created_time" => payload(&value, "created_time")
            .map(|created_time| PropertyValue::CreatedTime { created_time }),
        "last_edited_time" => payload(&value, "last_edited_time")
            .map(|last_edited_time| PropertyValue::LastEditedTime { last_edited_time }),
        _ => None,
    };

    parsed.unwrap_or(PropertyValue::Unsupported { property_type })
}
