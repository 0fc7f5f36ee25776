//! Command handlers for the CLI.
//!
//! Handlers build their result first and print it last, so the building half
//! can be exercised without capturing stdout. Malformed items inside an input
//! file are logged and skipped by the normalizer; an unreadable file aborts
//! the run.

use chrono::{DateTime, Utc};
use trendlens_core::{AppConfig, ContentRecord, Platform, Taxonomy};
use trendlens_normalizer::{normalize_batch, NormalizeContext};
use trendlens_trends::{analyze_trends, AnalysisConfig, TrendAnalysis};

use crate::input::{read_items, InputSpec};

/// Taxonomy from `TRENDLENS_TAXONOMY_PATH` when set, otherwise the built-in one.
///
/// # Errors
///
/// Returns an error if the configured file cannot be loaded or fails validation.
pub(crate) fn load_taxonomy(config: &AppConfig) -> anyhow::Result<Taxonomy> {
    match &config.taxonomy_path {
        Some(path) => {
            let taxonomy = trendlens_core::load_taxonomy(path)?;
            tracing::debug!(
                path = %path.display(),
                topics = taxonomy.topics.len(),
                "taxonomy loaded"
            );
            Ok(taxonomy)
        }
        None => Ok(Taxonomy::default()),
    }
}

/// Normalizes every input file and analyzes the combined records.
///
/// # Errors
///
/// Returns an error if any input file cannot be read.
pub(crate) fn analyze_inputs(
    inputs: &[InputSpec],
    config: &AppConfig,
    taxonomy: &Taxonomy,
    now: DateTime<Utc>,
) -> anyhow::Result<TrendAnalysis> {
    let ctx = NormalizeContext::at(taxonomy, now);
    let mut records: Vec<ContentRecord> = Vec::new();

    for input in inputs {
        let items = read_items(&input.path)?;
        let normalized = normalize_batch(&items, input.platform, &ctx);
        tracing::info!(
            platform = %input.platform,
            path = %input.path.display(),
            received = items.len(),
            normalized = normalized.len(),
            "input normalized"
        );
        records.extend(normalized);
    }

    Ok(analyze_trends(&records, &AnalysisConfig::from(config)))
}

/// Normalizes one input file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub(crate) fn normalize_input(
    input: &InputSpec,
    taxonomy: &Taxonomy,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<ContentRecord>> {
    let items = read_items(&input.path)?;
    let ctx = NormalizeContext::at(taxonomy, now);
    Ok(normalize_batch(&items, input.platform, &ctx))
}

/// `trendlens analyze`: prints the analysis as pretty JSON.
///
/// # Errors
///
/// Returns an error if an input cannot be read or output serialization fails.
pub(crate) fn run_analyze(inputs: &[InputSpec], config: &AppConfig) -> anyhow::Result<()> {
    let taxonomy = load_taxonomy(config)?;
    let analysis = analyze_inputs(inputs, config, &taxonomy, Utc::now())?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

/// `trendlens normalize`: prints the normalized records as pretty JSON.
///
/// # Errors
///
/// Returns an error if the input cannot be read or output serialization fails.
pub(crate) fn run_normalize(
    platform: Platform,
    path: std::path::PathBuf,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let taxonomy = load_taxonomy(config)?;
    let records = normalize_input(&InputSpec { platform, path }, &taxonomy, Utc::now())?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
