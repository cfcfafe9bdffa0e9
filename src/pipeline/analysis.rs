//! Full statistical treatment of one contingency table

use anyhow::Context;
use serde::Serialize;

use super::crosstab::{crosstab, ContingencyTable};
use super::error::AnalysisError;
use super::extract::{split_labels, GenderedNoun};
use super::stats::{
    chi2_contingency, cramers_v, cramers_v_from_test, diagonal_agreement, fisher_exact,
    matthews_corrcoef, Divergence, FisherExact, IndependenceTest,
};

/// A contingency table with every statistic that applies to its shape
#[derive(Debug, Clone, Serialize)]
pub struct TableAnalysis {
    pub name: String,
    pub table: ContingencyTable,
    pub matthews: f64,
    /// Absent when the independence tests were skipped
    pub cramers_v: Option<f64>,
    /// Present only for aligned (square, same-label) tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagonal_ratio: Option<f64>,
    pub chi_squared: Option<IndependenceTest>,
    pub g_test: Option<IndependenceTest>,
    /// Present only for 2x2 tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fisher: Option<FisherExact>,
    /// Why the chi-squared family was not computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

impl TableAnalysis {
    /// Chi-squared and G-test, in report order, when they were computed.
    pub fn independence_tests(&self) -> impl Iterator<Item = &IndependenceTest> {
        self.chi_squared.iter().chain(self.g_test.iter())
    }
}

/// Compute all statistics for `table`.
///
/// Diagonal agreement and Fisher's exact test are shape-dependent and only
/// run when the table qualifies. A declared label with no observations gives
/// a zero expected frequency; the chi-squared family and Cramér's V are then
/// skipped with the reason recorded, and the remaining statistics still run.
pub fn analyze_table(
    name: &str,
    table: ContingencyTable,
    correction: bool,
) -> Result<TableAnalysis, AnalysisError> {
    let matthews = matthews_corrcoef(&table);

    let (chi_squared, g_test, cramers_v, skipped) = match independence(&table, correction) {
        Ok(tests) => (
            Some(tests.chi_squared),
            Some(tests.g_test),
            Some(tests.cramers_v),
            None,
        ),
        Err(err @ AnalysisError::ZeroExpected { .. }) => (None, None, None, Some(err.to_string())),
        Err(err) => return Err(err),
    };

    let diagonal_ratio = if table.is_aligned() {
        Some(diagonal_agreement(&table)?)
    } else {
        None
    };

    let fisher = if table.is_two_by_two() {
        Some(fisher_exact(&table)?)
    } else {
        None
    };

    Ok(TableAnalysis {
        name: name.to_string(),
        table,
        matthews,
        cramers_v,
        diagonal_ratio,
        chi_squared,
        g_test,
        fisher,
        skipped,
    })
}

/// Cross-tabulate gendered pairs (source as rows) and analyze the table.
///
/// Errors carry the table name so a failure can be traced to the full or
/// the grouped systems.
pub fn analyze_pairs(
    name: &str,
    nouns: &[GenderedNoun],
    row_labels: &[String],
    column_labels: &[String],
    correction: bool,
) -> anyhow::Result<TableAnalysis> {
    let (rows, columns) = split_labels(nouns);
    let table = crosstab(&rows, &columns, row_labels, column_labels)
        .with_context(|| format!("Failed to cross-tabulate {}", name.to_lowercase()))?;
    analyze_table(name, table, correction)
        .with_context(|| format!("Failed to analyze {}", name.to_lowercase()))
}

struct Independence {
    chi_squared: IndependenceTest,
    g_test: IndependenceTest,
    cramers_v: f64,
}

fn independence(table: &ContingencyTable, correction: bool) -> Result<Independence, AnalysisError> {
    let chi_squared = chi2_contingency(table, Divergence::Pearson, correction)?;
    // V needs the raw statistic; only recompute when Yates moved it
    let cramers_v = match cramers_v_from_test(table, &chi_squared) {
        Some(v) => v,
        None => cramers_v(table)?,
    };
    let g_test = chi2_contingency(table, Divergence::LogLikelihood, correction)?;

    Ok(Independence {
        chi_squared,
        g_test,
        cramers_v,
    })
}
