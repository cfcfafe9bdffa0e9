//! Label grouping under a coarser alphabet
//!
//! A grouping maps every label of a declared domain onto a (usually smaller)
//! alphabet, e.g. folding German neuter into masculine so that a three-gender
//! system can be compared cell-for-cell with a two-gender one. The mapping is
//! checked for totality on construction.

use std::collections::BTreeMap;

use super::error::AnalysisError;
use super::extract::GenderedNoun;

/// Total mapping from a declared label domain to grouped labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderGrouping {
    domain: Vec<String>,
    mapping: BTreeMap<String, String>,
}

impl GenderGrouping {
    /// Create a grouping over `domain`.
    ///
    /// Fails with [`AnalysisError::IncompleteMapping`] if any domain label has
    /// no target. Mapping entries for labels outside the domain are ignored.
    pub fn new(domain: &[String], mapping: BTreeMap<String, String>) -> Result<Self, AnalysisError> {
        let missing: Vec<String> = domain
            .iter()
            .filter(|label| !mapping.contains_key(*label))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Err(AnalysisError::IncompleteMapping { missing });
        }

        let mapping = mapping
            .into_iter()
            .filter(|(from, _)| domain.contains(from))
            .collect();

        Ok(Self {
            domain: domain.to_vec(),
            mapping,
        })
    }

    /// Fold neuter into masculine over {m, f, n}.
    pub fn neuter_as_masculine() -> Self {
        let domain: Vec<String> = ["m", "f", "n"].iter().map(|s| s.to_string()).collect();
        let mapping = [("f", "f"), ("m", "m"), ("n", "m")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { domain, mapping }
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn mapping(&self) -> &BTreeMap<String, String> {
        &self.mapping
    }

    /// Distinct grouped labels in domain order.
    pub fn codomain(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for label in &self.domain {
            if let Some(target) = self.mapping.get(label) {
                if !labels.contains(target) {
                    labels.push(target.clone());
                }
            }
        }
        labels
    }

    /// Map a single label.
    pub fn apply(&self, label: &str) -> Result<&str, AnalysisError> {
        self.mapping
            .get(label)
            .map(|s| s.as_str())
            .ok_or_else(|| AnalysisError::UnmappedLabel {
                label: label.to_string(),
                domain: self.domain.clone(),
            })
    }

    /// Map every label, failing on the first one outside the domain.
    pub fn apply_all(&self, labels: &[String]) -> Result<Vec<String>, AnalysisError> {
        labels
            .iter()
            .map(|l| self.apply(l).map(str::to_string))
            .collect()
    }

    /// Group the source side of each noun, leaving the target side untouched.
    pub fn group_sources(&self, nouns: &[GenderedNoun]) -> Result<Vec<GenderedNoun>, AnalysisError> {
        nouns
            .iter()
            .map(|n| {
                Ok(GenderedNoun {
                    source: self.apply(&n.source)?.to_string(),
                    target: n.target.clone(),
                })
            })
            .collect()
    }
}
