// src/config.rs
use crate::constants::{RAW_CONTENT_FILE, STRUCTURED_CONTENT_FILE};
use crate::error::AppError;
use crate::types::{EntityId, ValidationError};
use clap::Parser;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Path to the raw content document produced by the fetch layer
    #[arg(long, default_value = RAW_CONTENT_FILE)]
    pub raw_content: PathBuf,

    /// Path where the structured site model is persisted between stages
    #[arg(long, default_value = STRUCTURED_CONTENT_FILE)]
    pub structured_content: PathBuf,

    /// Directory to write the generated site into
    #[arg(short = 'o', long, default_value = "./_site")]
    pub output_dir: PathBuf,

    /// Base URL of the published site (falls back to the SITE_URL env var)
    #[arg(short = 's', long)]
    pub site_url: Option<String>,

    /// Explicit root entity ID. When absent, the first entry of the raw
    /// content document is taken as the root.
    #[arg(long)]
    pub root_id: Option<String>,

    /// Download referenced files and rewrite references to local paths
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub download_files: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved site configuration — validated and ready to drive all stages.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub raw_content: PathBuf,
    pub structured_content: PathBuf,
    pub output_dir: PathBuf,
    /// Site base URL with any trailing slash removed.
    pub site_url: String,
    pub root_id: Option<EntityId>,
    pub download_files: bool,
    pub verbose: bool,
}

impl SiteConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let site_url = cli
            .site_url
            .or_else(|| std::env::var("SITE_URL").ok())
            .ok_or_else(|| {
                AppError::MissingConfiguration(
                    "site URL not given (--site-url or SITE_URL environment variable)".to_string(),
                )
            })?;

        let site_url = normalize_site_url(&site_url)?;

        Ok(SiteConfig {
            raw_content: cli.raw_content,
            structured_content: cli.structured_content,
            output_dir: cli.output_dir,
            site_url,
            root_id: cli.root_id.map(EntityId::from),
            download_files: cli.download_files,
            verbose: cli.verbose,
        })
    }
}

/// Validates the site base URL and strips any trailing slash so that URL
/// joining is a plain `{base}/{segment}` concatenation everywhere.
fn normalize_site_url(input: &str) -> Result<String, AppError> {
    let parsed = url::Url::parse(input).map_err(|e| ValidationError::InvalidUrl {
        url: input.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: "only HTTP and HTTPS site URLs are supported".to_string(),
        }
        .into());
    }

    Ok(input.trim_end_matches('/').to_string())
}
