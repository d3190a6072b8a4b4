// src/types/rich_text.rs
//! Rich text spans as delivered by the fetch layer.
//!
//! A block's text content is an ordered sequence of [`RichTextItem`]s. Each
//! item is either plain annotated text, an inline equation, or a mention of
//! another object. The enum variant carries its payload, so formatting code
//! matches exhaustively instead of probing key names.

use serde::{Deserialize, Serialize};

/// One run of annotated text within a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextItem {
    #[serde(flatten)]
    pub kind: RichTextKind,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
}

impl RichTextItem {
    /// A plain, unannotated span. Mostly useful in tests.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind: RichTextKind::Text {
                text: TextData {
                    content: text.clone(),
                    link: None,
                },
            },
            plain_text: text,
            href: None,
            annotations: Annotations::default(),
        }
    }
}

/// The span variants the source system produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RichTextKind {
    Text { text: TextData },
    Equation { equation: EquationData },
    Mention { mention: MentionData },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub content: String,
    #[serde(default)]
    pub link: Option<LinkData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkData {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationData {
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionData {
    #[serde(rename = "type")]
    pub mention_type: MentionType,
}

/// Mention targets. Page and database mentions render as links; user and
/// date mentions render as plain parenthesized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionType {
    User,
    Page,
    Database,
    Date,
    #[serde(other)]
    Other,
}

/// The annotation set carried by every span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: String,
}

impl Annotations {
    pub fn is_default_color(&self) -> bool {
        self.color == "default"
    }
}

impl Default for Annotations {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            strikethrough: false,
            underline: false,
            code: false,
            color: "default".to_string(),
        }
    }
}
