//! Analysis configuration loaded from JSON
//!
//! The label alphabets and the grouping hypothesis live outside the code so
//! that alternative linguistic groupings can be tested without rebuilding.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pipeline::{GenderExtractor, GenderGrouping, DEFAULT_GENDER_PATTERN};

/// Label alphabets, grouping mapping and extraction pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Display name of the source language (first text column)
    pub source_language: String,
    /// Display name of the target language (second text column)
    pub target_language: String,
    /// Ordered gender labels of the source language
    pub source_labels: Vec<String>,
    /// Ordered gender labels of the target language
    pub target_labels: Vec<String>,
    /// Mapping from every source label to a grouped label
    pub grouping: BTreeMap<String, String>,
    /// Ordered labels produced by the grouping
    pub grouped_labels: Vec<String>,
    /// Extraction regex; capture group 1 is the label
    pub pattern: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let grouping = GenderGrouping::neuter_as_masculine();
        Self {
            source_language: "German".to_string(),
            target_language: "French".to_string(),
            source_labels: strings(&["m", "f", "n"]),
            target_labels: strings(&["m", "f"]),
            grouping: grouping.mapping().clone(),
            grouped_labels: grouping.codomain(),
            pattern: DEFAULT_GENDER_PATTERN.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Check label sets and the grouping mapping for consistency.
    pub fn validate(&self) -> Result<()> {
        for (name, labels) in [
            ("source_labels", &self.source_labels),
            ("target_labels", &self.target_labels),
            ("grouped_labels", &self.grouped_labels),
        ] {
            if labels.is_empty() {
                anyhow::bail!("'{}' must not be empty", name);
            }
            let mut seen: Vec<&String> = Vec::with_capacity(labels.len());
            for label in labels {
                if seen.contains(&label) {
                    anyhow::bail!("'{}' contains duplicate label '{}'", name, label);
                }
                seen.push(label);
            }
        }

        let grouping = self.grouping()?;
        for target in grouping.codomain() {
            if !self.grouped_labels.contains(&target) {
                anyhow::bail!(
                    "Grouping produces '{}', which is not in grouped_labels {:?}",
                    target,
                    self.grouped_labels
                );
            }
        }

        GenderExtractor::new(&self.pattern)?;
        Ok(())
    }

    /// Grouping over the source alphabet.
    pub fn grouping(&self) -> Result<GenderGrouping> {
        Ok(GenderGrouping::new(
            &self.source_labels,
            self.grouping.clone(),
        )?)
    }

    pub fn extractor(&self) -> Result<GenderExtractor> {
        GenderExtractor::new(&self.pattern)
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
