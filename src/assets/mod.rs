// src/assets/mod.rs
//! Asset localization: fetch each referenced remote file once and rewrite
//! every reference to it to the local path.
//!
//! Fetches for one entity fan out concurrently; the rewrites apply only
//! after all of that entity's fetches settle, so a reader never observes an
//! entity with half its references rewritten. One failed fetch skips its own
//! rewrite and nothing else.

use crate::config::SiteConfig;
use crate::constants::DOWNLOAD_CONCURRENCY;
use crate::error::{AssetFetchFailure, Result};
use crate::site::{Entity, SiteModel};
use crate::types::EntityId;
use futures::stream::{self, StreamExt};
use percent_encoding::percent_decode_str;
use std::path::PathBuf;

/// One planned download: where the file comes from, the URL that will
/// replace it, and where it lands on disk.
#[derive(Debug, Clone)]
struct AssetPlan {
    /// Position in the entity's `files` list.
    index: usize,
    remote: String,
    local_url: String,
    dest: PathBuf,
}

/// Downloads every referenced asset and rewrites references entity by entity.
pub async fn localize_assets(model: &mut SiteModel, config: &SiteConfig) -> Result<()> {
    let client = reqwest::Client::new();
    let ids: Vec<EntityId> = model.pages.keys().cloned().collect();

    let mut downloaded = 0usize;
    for id in ids {
        let plans = {
            let entity = model.entity(&id)?;
            plan_entity_assets(&id, entity, config)?
        };
        if plans.is_empty() {
            continue;
        }

        let fetched: Vec<(usize, bool)> = stream::iter(plans.iter().cloned())
            .map(|plan| {
                let client = client.clone();
                async move {
                    let ok = fetch_asset(&client, &plan).await;
                    (plan.index, ok)
                }
            })
            .buffer_unordered(DOWNLOAD_CONCURRENCY)
            .collect()
            .await;

        let entity = model.entity_mut(&id)?;
        for plan in &plans {
            let ok = fetched
                .iter()
                .any(|(index, ok)| *index == plan.index && *ok);
            if ok {
                rewrite_entity(entity, plan.index, &plan.remote, &plan.local_url);
                downloaded += 1;
            }
        }
    }

    log::debug!("Localized {} asset reference(s)", downloaded);
    Ok(())
}

/// Computes the download plan for one entity's `files` list, in discovery
/// order. Malformed references are logged and skipped; nothing of theirs is
/// ever mutated.
fn plan_entity_assets(id: &EntityId, entity: &Entity, config: &SiteConfig) -> Result<Vec<AssetPlan>> {
    if entity.files.is_empty() {
        return Ok(Vec::new());
    }
    let entity_url = entity.url_or_err(id)?;

    let mut plans = Vec::with_capacity(entity.files.len());
    for (index, remote) in entity.files.iter().enumerate() {
        match plan_one_asset(index, remote, entity_url, config) {
            Ok(plan) => plans.push(plan),
            Err(failure) => log::warn!("Skipping asset: {}", failure),
        }
    }
    Ok(plans)
}

fn plan_one_asset(
    index: usize,
    remote: &str,
    entity_url: &str,
    config: &SiteConfig,
) -> std::result::Result<AssetPlan, AssetFetchFailure> {
    let parsed = url::Url::parse(remote)
        .map_err(|e| AssetFetchFailure::malformed(remote, e.to_string()))?;

    // Percent-decoded, query-stripped basename.
    let raw_name = parsed
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let filename = percent_decode_str(&raw_name).decode_utf8_lossy().to_string();
    if filename.is_empty() {
        return Err(AssetFetchFailure::malformed(remote, "URL has no basename"));
    }

    let local_url = format!("{}/{}", entity_url, filename);
    let relative = local_url
        .strip_prefix(&config.site_url)
        .unwrap_or(&local_url)
        .trim_start_matches('/');
    let dest = config.output_dir.join(relative);

    Ok(AssetPlan {
        index,
        remote: remote.to_string(),
        local_url,
        dest,
    })
}

/// Fetches one asset to its destination. Returns whether the rewrite may
/// proceed: true when the file was downloaded now or already on disk, false
/// when the remote was absent (the stale URL then stays in place).
async fn fetch_asset(client: &reqwest::Client, plan: &AssetPlan) -> bool {
    if plan.dest.exists() {
        log::debug!("{} already exists", plan.dest.display());
        return true;
    }

    if let Some(parent) = plan.dest.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            log::warn!("Cannot create {}: {}", parent.display(), e);
            return false;
        }
    }

    match download(client, &plan.remote, &plan.dest).await {
        Ok(()) => {
            log::debug!("Downloaded {}", plan.dest.display());
            true
        }
        Err(failure) => {
            log::warn!("Cannot download asset: {}", failure);
            false
        }
    }
}

async fn download(
    client: &reqwest::Client,
    remote: &str,
    dest: &std::path::Path,
) -> std::result::Result<(), AssetFetchFailure> {
    let response = client
        .get(remote)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AssetFetchFailure::from_request_error(remote, &e))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AssetFetchFailure::from_request_error(remote, &e))?;
    tokio::fs::write(dest, &bytes).await.map_err(|e| {
        AssetFetchFailure::RemoteAbsent {
            url: remote.to_string(),
            cause: e.to_string(),
        }
    })
}

/// Replaces every textual occurrence of `remote` with `local` across the
/// entity: the `files` entry itself, the markdown body, cover and icon on
/// exact match, and every rendered property value.
fn rewrite_entity(entity: &mut Entity, index: usize, remote: &str, local: &str) {
    if let Some(slot) = entity.files.get_mut(index) {
        *slot = local.to_string();
    }

    if entity.markdown.contains(remote) {
        entity.markdown = entity.markdown.replace(remote, local);
    }

    if entity.cover.as_deref() == Some(remote) {
        entity.cover = Some(local.to_string());
    }
    if entity.icon.as_deref() == Some(remote) {
        entity.icon = Some(local.to_string());
    }

    for value in entity.properties_md.values_mut() {
        if value.contains(remote) {
            *value = value.replace(remote, local);
        }
    }
}
