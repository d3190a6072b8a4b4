// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion2site::{
    load_raw_content, structurize, write_markdown_pages, write_site_model, AppError,
    CommandLineInput, SiteConfig,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("notion2site.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs the two persisted stages: structure the raw content document, then
/// render the markdown pages. The raw document itself comes from the fetch
/// tool; without it there is nothing to structure.
async fn execute_pipeline(config: &SiteConfig) -> Result<(), AppError> {
    if !config.raw_content.exists() {
        return Err(AppError::MissingConfiguration(format!(
            "raw content document '{}' not found; run the fetch tool first",
            config.raw_content.display()
        )));
    }

    log::info!("Reading raw content from {}", config.raw_content.display());
    let raw = load_raw_content(&config.raw_content)?;
    log::info!("Loaded {} raw entities", raw.len());

    log::info!("Structuring site content");
    let model = structurize(&raw, config).await?;
    write_site_model(&config.structured_content, &model)?;
    log::info!(
        "Structured {} entities; model saved to {}",
        model.pages.len(),
        config.structured_content.display()
    );

    write_markdown_pages(&model, config)?;
    log::info!(
        "Site written to {} ({} pages)",
        config.output_dir.display(),
        model.pages.len()
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = SiteConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
