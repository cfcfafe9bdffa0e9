//! Gender tag extraction from dictionary text
//!
//! Dictionary entries mark a noun's gender with a bracketed tag such as
//! `Haus {n}` or `ciseaux {m.pl}`. The extractor pulls the single-letter label
//! out of both text fields and keeps only records where both sides carry one.

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use super::loader::Record;

/// Bracketed single-letter gender tag with an optional plural marker.
pub const DEFAULT_GENDER_PATTERN: &str = r"\{([a-z])(?:\.pl)?\}";

/// A record reduced to its pair of gender labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderedNoun {
    pub source: String,
    pub target: String,
}

impl GenderedNoun {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Counts of records seen and kept by the extractor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub input: usize,
    pub retained: usize,
}

impl ExtractionStats {
    pub fn dropped(&self) -> usize {
        self.input - self.retained
    }

    /// Share of input records retained, 0.0 for empty input.
    pub fn retention_ratio(&self) -> f64 {
        if self.input == 0 {
            0.0
        } else {
            self.retained as f64 / self.input as f64
        }
    }
}

/// Pattern-based gender label extractor
#[derive(Debug, Clone)]
pub struct GenderExtractor {
    pattern: Regex,
}

impl GenderExtractor {
    /// Build an extractor from a custom pattern.
    ///
    /// The label is taken from capture group 1, so the pattern must define one.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid gender pattern: {}", pattern))?;

        if pattern.captures_len() < 2 {
            anyhow::bail!(
                "Gender pattern '{}' must contain a capture group for the label",
                pattern.as_str()
            );
        }

        Ok(Self { pattern })
    }

    /// Extractor using [`DEFAULT_GENDER_PATTERN`].
    pub fn standard() -> Result<Self> {
        Self::new(DEFAULT_GENDER_PATTERN)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Extract the label from the first tag in `text`, if any.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extract both labels of a record; `None` unless both fields match.
    pub fn extract_record(&self, record: &Record) -> Option<GenderedNoun> {
        let source = self.extract(&record.source)?;
        let target = self.extract(&record.target)?;
        Some(GenderedNoun { source, target })
    }

    /// Extract all records, dropping those without a label on both sides.
    pub fn extract_all(&self, records: &[Record]) -> (Vec<GenderedNoun>, ExtractionStats) {
        let nouns: Vec<GenderedNoun> = records
            .iter()
            .filter_map(|r| self.extract_record(r))
            .collect();

        let stats = ExtractionStats {
            input: records.len(),
            retained: nouns.len(),
        };

        (nouns, stats)
    }
}

/// Keep only nouns whose labels belong to the declared alphabets.
///
/// Returns the kept nouns and the number discarded.
pub fn retain_declared(
    nouns: Vec<GenderedNoun>,
    source_labels: &[String],
    target_labels: &[String],
) -> (Vec<GenderedNoun>, usize) {
    let before = nouns.len();
    let kept: Vec<GenderedNoun> = nouns
        .into_iter()
        .filter(|n| source_labels.contains(&n.source) && target_labels.contains(&n.target))
        .collect();
    let discarded = before - kept.len();
    (kept, discarded)
}

/// Split gendered nouns into parallel source and target label sequences.
pub fn split_labels(nouns: &[GenderedNoun]) -> (Vec<String>, Vec<String>) {
    nouns
        .iter()
        .map(|n| (n.source.clone(), n.target.clone()))
        .unzip()
}
