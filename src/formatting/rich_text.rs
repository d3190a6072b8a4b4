// src/formatting/rich_text.rs
//! Span-by-span rich text rendering.
//!
//! Output is the concatenation of per-span renderings in original order; no
//! re-ordering, no merging of adjacent identical styles. Annotation markers
//! nest in a fixed sequence (bold, then italic, strikethrough, underline,
//! code, each wrapping the previous result, color outermost) so emphasis
//! markers always round-trip the same way regardless of how the source
//! declares them.

use crate::types::{Annotations, MentionType, RichTextItem, RichTextKind, TextData};

/// Renders an ordered sequence of spans into one inline markdown fragment.
pub fn render_rich_text(spans: &[RichTextItem]) -> String {
    spans.iter().map(render_span).collect()
}

fn render_span(span: &RichTextItem) -> String {
    match &span.kind {
        RichTextKind::Equation { .. } => format!("$ {} $", span.plain_text),
        RichTextKind::Mention { mention } => render_mention(span, mention.mention_type),
        RichTextKind::Text { text } => {
            let base = render_text_base(span, text);
            apply_color(apply_annotations(base, &span.annotations), &span.annotations)
        }
    }
}

fn render_text_base(span: &RichTextItem, text: &TextData) -> String {
    let target = text
        .link
        .as_ref()
        .map(|link| link.url.as_str())
        .or(span.href.as_deref());
    match target {
        Some(url) => format!("[{}]({})", text.content, url),
        None => span.plain_text.clone(),
    }
}

fn render_mention(span: &RichTextItem, mention_type: MentionType) -> String {
    match mention_type {
        MentionType::Page | MentionType::Database => match span.href.as_deref() {
            Some(url) => {
                // A mention of an untitled target shows the URL itself.
                let content = if span.plain_text == "Untitled" {
                    url
                } else {
                    span.plain_text.as_str()
                };
                format!("[{}]({})", content, url)
            }
            None => format!("({})", span.plain_text),
        },
        MentionType::User | MentionType::Date => format!("({})", span.plain_text),
        MentionType::Other => String::new(),
    }
}

fn apply_annotations(mut out: String, annotations: &Annotations) -> String {
    if annotations.bold {
        out = format!("**{}**", out);
    }
    if annotations.italic {
        out = format!("*{}*", out);
    }
    if annotations.strikethrough {
        out = format!("~~{}~~", out);
    }
    if annotations.underline {
        out = format!("<u>{}</u>", out);
    }
    if annotations.code {
        out = format!("`{}`", out);
    }
    out
}

fn apply_color(out: String, annotations: &Annotations) -> String {
    if annotations.is_default_color() {
        out
    } else {
        format!("<span style='color:{}'>{}</span>", annotations.color, out)
    }
}
