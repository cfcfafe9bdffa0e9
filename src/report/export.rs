//! JSON export of analysis results

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::summary::AnalysisSummary;
use crate::cli::AnalysisConfig;
use crate::pipeline::TableAnalysis;

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Genus version
    pub genus_version: String,
    /// Input file path
    pub input_file: String,
    /// Category the entries were filtered on
    pub category: String,
    /// Header lines skipped
    pub skip_lines: usize,
    /// Whether Yates' correction was enabled
    pub correction: bool,
}

/// Complete analysis export
#[derive(Serialize)]
pub struct AnalysisReport<'a> {
    pub metadata: ReportMetadata,
    pub config: &'a AnalysisConfig,
    pub summary: &'a AnalysisSummary,
    pub analyses: &'a [TableAnalysis],
}

/// Parameters for the report metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub category: &'a str,
    pub skip_lines: usize,
    pub correction: bool,
}

/// Build the report structure without writing it.
pub fn build_report<'a>(
    analyses: &'a [TableAnalysis],
    summary: &'a AnalysisSummary,
    config: &'a AnalysisConfig,
    params: &ExportParams,
) -> AnalysisReport<'a> {
    AnalysisReport {
        metadata: ReportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            genus_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            category: params.category.to_string(),
            skip_lines: params.skip_lines,
            correction: params.correction,
        },
        config,
        summary,
        analyses,
    }
}

/// Export analysis results to a JSON file.
///
/// Non-finite statistics (e.g. an infinite odds ratio) are written as `null`.
pub fn export_analysis(
    analyses: &[TableAnalysis],
    summary: &AnalysisSummary,
    config: &AnalysisConfig,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let report = build_report(analyses, summary, config, params);

    let json =
        serde_json::to_string_pretty(&report).context("Failed to serialize analysis to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write analysis to {}", output_path.display()))?;

    Ok(())
}
