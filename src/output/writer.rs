// src/output/writer.rs
//! Markdown page rendering: one `<title>.md` file per entity under its URL
//! path, front matter first, body after.

use crate::config::SiteConfig;
use crate::error::Result;
use crate::site::{Entity, SiteModel};
use std::fs;

/// Writes every entity's markdown file under the output directory.
pub fn write_markdown_pages(model: &SiteModel, config: &SiteConfig) -> Result<()> {
    for (id, entity) in &model.pages {
        let url = entity.url_or_err(id)?;
        let relative = url
            .strip_prefix(&config.site_url)
            .unwrap_or(url)
            .trim_start_matches('/');
        let dir = config.output_dir.join(relative);
        fs::create_dir_all(&dir)?;

        let title = entity.title.as_deref().unwrap_or("Untitled");
        let path = dir.join(format!("{}.md", title));
        let content = format!("{}{}", render_front_matter(entity), entity.markdown);
        fs::write(&path, content)?;
        log::debug!("Wrote {}", path.display());
    }

    log::debug!("Wrote {} markdown page(s)", model.pages.len());
    Ok(())
}

/// The YAML-like front matter block: title, cover, icon, emoji, then every
/// rendered property, in property order.
pub fn render_front_matter(entity: &Entity) -> String {
    let mut out = String::from("---\n");
    push_field(&mut out, "title", entity.title.as_deref());
    push_field(&mut out, "cover", entity.cover.as_deref());
    push_field(&mut out, "icon", entity.icon.as_deref());
    push_field(&mut out, "emoji", entity.emoji.as_deref());
    for (name, value) in &entity.properties_md {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out.push_str("---\n\n");
    out
}

fn push_field(out: &mut String, name: &str, value: Option<&str>) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value.unwrap_or_default());
    out.push('\n');
}
