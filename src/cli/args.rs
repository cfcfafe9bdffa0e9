//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Genus - Measure grammatical gender correlation between two languages
#[derive(Parser, Debug)]
#[command(name = "genus")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input dictionary file (tab-separated: source, target, category, comment)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Number of header lines to skip before the first entry.
    /// The default matches the header block of a dict.cc export.
    #[arg(long, default_value = "8")]
    pub skip_lines: usize,

    /// Category tag of the entries to analyze
    #[arg(long, default_value = "noun")]
    pub category: String,

    /// JSON analysis config (label alphabets, grouping mapping, pattern).
    /// Defaults to German {m, f, n} vs French {m, f} with neuter grouped as masculine.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report output path (JSON).
    /// Defaults to input directory with '_gender_analysis.json' suffix.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not write the JSON report
    #[arg(long, default_value = "false")]
    pub no_export: bool,

    /// Disable Yates' continuity correction for tables with one degree of freedom
    #[arg(long, default_value = "false")]
    pub no_correction: bool,
}

impl Cli {
    /// Get the report path, deriving from input if not explicitly provided.
    /// `None` when exporting is disabled.
    pub fn report_path(&self) -> Option<PathBuf> {
        if self.no_export {
            return None;
        }
        Some(self.output.clone().unwrap_or_else(|| {
            let parent = self
                .input
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("dictionary");
            parent.join(format!("{}_gender_analysis.json", stem))
        }))
    }

    /// Whether the continuity correction should be applied.
    pub fn correction(&self) -> bool {
        !self.no_correction
    }
}
