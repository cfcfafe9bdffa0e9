//! Association measures and independence tests on contingency tables
//!
//! Chi-squared and G statistics follow the usual contingency-table
//! conventions: expected frequencies come from the outer product of the
//! margins, degrees of freedom are `(r - 1)(c - 1)`, and Yates' continuity
//! correction is applied only when there is exactly one degree of freedom.

use faer::Mat;
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use statrs::function::factorial::ln_binomial;

use super::crosstab::ContingencyTable;
use super::error::AnalysisError;

/// Relative tolerance when comparing hypergeometric probabilities
const FISHER_RELATIVE_TOLERANCE: f64 = 1e-7;

/// Divergence used by the chi-squared family of tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Divergence {
    /// Pearson's chi-squared statistic
    Pearson,
    /// Log-likelihood ratio (G-test)
    LogLikelihood,
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Divergence::Pearson => write!(f, "Chi-squared"),
            Divergence::LogLikelihood => write!(f, "G-test"),
        }
    }
}

/// Result of a chi-squared-family independence test
#[derive(Debug, Clone, Serialize)]
pub struct IndependenceTest {
    pub divergence: Divergence,
    pub statistic: f64,
    pub p_value: f64,
    pub dof: usize,
    /// Whether Yates' continuity correction was applied
    pub corrected: bool,
    pub expected: Vec<Vec<f64>>,
}

/// Result of Fisher's exact test on a 2x2 table
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FisherExact {
    /// Sample odds ratio `ad / bc`
    pub odds_ratio: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// Expected cell frequencies under independence.
///
/// Fails on an empty table, or when a zero margin produces a zero cell.
pub fn expected_frequencies(table: &ContingencyTable) -> Result<Mat<f64>, AnalysisError> {
    let total = table.total();
    if total == 0 {
        return Err(AnalysisError::EmptyTable);
    }

    let (rows, cols) = table.shape();
    let row_totals = table.row_totals();
    let col_totals = table.column_totals();

    let r = Mat::<f64>::from_fn(rows, 1, |i, _| row_totals[i] as f64);
    let c = Mat::<f64>::from_fn(1, cols, |_, j| col_totals[j] as f64);
    let outer = &r * &c;

    let total = total as f64;
    let expected = Mat::<f64>::from_fn(rows, cols, |i, j| outer[(i, j)] / total);

    for i in 0..rows {
        for j in 0..cols {
            if expected[(i, j)] == 0.0 {
                return Err(AnalysisError::ZeroExpected { row: i, column: j });
            }
        }
    }

    Ok(expected)
}

/// Chi-squared test of independence with the chosen divergence.
///
/// With `correction` set and one degree of freedom, each observed count is
/// moved 0.5 towards its expected value (but never past it) first.
pub fn chi2_contingency(
    table: &ContingencyTable,
    divergence: Divergence,
    correction: bool,
) -> Result<IndependenceTest, AnalysisError> {
    let expected = expected_frequencies(table)?;
    let (rows, cols) = table.shape();
    let dof = (rows - 1) * (cols - 1);

    let expected_vec: Vec<Vec<f64>> = (0..rows)
        .map(|i| (0..cols).map(|j| expected[(i, j)]).collect())
        .collect();

    if dof == 0 {
        return Ok(IndependenceTest {
            divergence,
            statistic: 0.0,
            p_value: 1.0,
            dof,
            corrected: false,
            expected: expected_vec,
        });
    }

    let corrected = correction && dof == 1;
    let mut statistic = 0.0;

    for i in 0..rows {
        for j in 0..cols {
            let e = expected[(i, j)];
            let mut o = table.get(i, j) as f64;

            if corrected {
                let diff = e - o;
                o += diff.signum() * diff.abs().min(0.5);
            }

            statistic += match divergence {
                Divergence::Pearson => (o - e) * (o - e) / e,
                Divergence::LogLikelihood => {
                    if o > 0.0 {
                        2.0 * o * (o / e).ln()
                    } else {
                        0.0
                    }
                }
            };
        }
    }

    let p_value = chi2_sf(statistic, dof)?;

    Ok(IndependenceTest {
        divergence,
        statistic,
        p_value,
        dof,
        corrected,
        expected: expected_vec,
    })
}

/// Survival function of the chi-squared distribution.
pub fn chi2_sf(statistic: f64, dof: usize) -> Result<f64, AnalysisError> {
    let dist = ChiSquared::new(dof as f64)
        .map_err(|e| AnalysisError::Distribution(e.to_string()))?;
    Ok(dist.sf(statistic).clamp(0.0, 1.0))
}

/// Fisher's exact test (two-sided) on a 2x2 table.
///
/// The p-value sums the hypergeometric probabilities of every table with the
/// same margins that is no more likely than the observed one.
pub fn fisher_exact(table: &ContingencyTable) -> Result<FisherExact, AnalysisError> {
    if !table.is_two_by_two() {
        let (rows, columns) = table.shape();
        return Err(AnalysisError::NotTwoByTwo { rows, columns });
    }

    let (a, b) = (table.get(0, 0), table.get(0, 1));
    let (c, d) = (table.get(1, 0), table.get(1, 1));

    let odds_ratio = if b * c == 0 {
        if a * d == 0 {
            f64::NAN
        } else {
            f64::INFINITY
        }
    } else {
        (a * d) as f64 / (b * c) as f64
    };

    let row_totals = table.row_totals();
    let col_totals = table.column_totals();
    if row_totals.contains(&0) || col_totals.contains(&0) {
        return Ok(FisherExact {
            odds_ratio: f64::NAN,
            p_value: 1.0,
        });
    }

    let n = a + b + c + d;
    let first_row = a + b;
    let first_col = a + c;

    let ln_pmf = |x: u64| {
        ln_binomial(first_row, x) + ln_binomial(n - first_row, first_col - x)
            - ln_binomial(n, first_col)
    };

    let lo = first_col.saturating_sub(n - first_row);
    let hi = first_row.min(first_col);
    let threshold = ln_pmf(a) + FISHER_RELATIVE_TOLERANCE.ln_1p();

    let p_value: f64 = (lo..=hi)
        .map(ln_pmf)
        .filter(|&lp| lp <= threshold)
        .map(f64::exp)
        .sum();

    Ok(FisherExact {
        odds_ratio,
        p_value: p_value.min(1.0),
    })
}

/// Matthews correlation coefficient over the union of row and column labels.
///
/// Rows are read as the first variable and columns as the second. A column
/// label absent from the rows contributes an empty row (and vice versa), so
/// a 3x2 table is scored as the 3x3 confusion matrix it implies. Returns 0.0
/// when either variable is constant.
pub fn matthews_corrcoef(table: &ContingencyTable) -> f64 {
    let mut labels: Vec<&String> = table.row_labels().iter().collect();
    for label in table.column_labels() {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    let k = labels.len();
    let mut confusion = vec![vec![0.0f64; k]; k];
    for (i, row_label) in table.row_labels().iter().enumerate() {
        let ui = labels.iter().position(|l| *l == row_label).unwrap_or(i);
        for (j, col_label) in table.column_labels().iter().enumerate() {
            let uj = labels.iter().position(|l| *l == col_label).unwrap_or(j);
            confusion[ui][uj] += table.get(i, j) as f64;
        }
    }

    let t: Vec<f64> = confusion.iter().map(|r| r.iter().sum::<f64>()).collect();
    let p: Vec<f64> = (0..k)
        .map(|j| confusion.iter().map(|r| r[j]).sum::<f64>())
        .collect();
    let correct: f64 = (0..k).map(|i| confusion[i][i]).sum();
    let s: f64 = t.iter().sum();

    let cov_tp = correct * s - t.iter().zip(&p).map(|(a, b)| a * b).sum::<f64>();
    let cov_pp = s * s - p.iter().map(|x| x * x).sum::<f64>();
    let cov_tt = s * s - t.iter().map(|x| x * x).sum::<f64>();

    if cov_pp * cov_tt == 0.0 {
        return 0.0;
    }

    (cov_tp / (cov_tt * cov_pp).sqrt()).clamp(-1.0, 1.0)
}

/// Share of observations on the diagonal of an aligned table.
pub fn diagonal_agreement(table: &ContingencyTable) -> Result<f64, AnalysisError> {
    let diagonal = table.diagonal_sum()?;
    let total = table.total();
    if total == 0 {
        return Err(AnalysisError::EmptyTable);
    }
    Ok(diagonal as f64 / total as f64)
}

/// Cramér's V from the uncorrected Pearson statistic.
///
/// Tables with a single row or column have no association to measure and
/// score 0.0.
pub fn cramers_v(table: &ContingencyTable) -> Result<f64, AnalysisError> {
    let (rows, cols) = table.shape();
    if rows.min(cols) < 2 {
        return Ok(0.0);
    }

    let test = chi2_contingency(table, Divergence::Pearson, false)?;
    Ok(cramers_v_statistic(table, test.statistic))
}

/// Cramér's V from an already computed Pearson test on `table`.
///
/// Returns `None` if `test` is not an uncorrected Pearson test, since V is
/// only defined on the raw statistic.
pub fn cramers_v_from_test(table: &ContingencyTable, test: &IndependenceTest) -> Option<f64> {
    if test.divergence != Divergence::Pearson || test.corrected {
        return None;
    }
    Some(cramers_v_statistic(table, test.statistic))
}

fn cramers_v_statistic(table: &ContingencyTable, chi_squared: f64) -> f64 {
    let (rows, cols) = table.shape();
    let k = rows.min(cols);
    if k < 2 {
        return 0.0;
    }

    let n = table.total() as f64;
    (chi_squared / (n * (k - 1) as f64)).sqrt().min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn table(counts: Vec<Vec<u64>>) -> ContingencyTable {
        let mf = labels(&["m", "f"]);
        ContingencyTable::from_counts(&mf, &mf, counts).unwrap()
    }

    #[test]
    fn test_expected_frequencies() {
        let expected = expected_frequencies(&table(vec![vec![10, 20], vec![30, 40]])).unwrap();
        assert!((expected[(0, 0)] - 12.0).abs() < 1e-12);
        assert!((expected[(0, 1)] - 18.0).abs() < 1e-12);
        assert!((expected[(1, 0)] - 28.0).abs() < 1e-12);
        assert!((expected[(1, 1)] - 42.0).abs() < 1e-12);
    }

    #[test]
    fn test_expected_frequencies_zero_margin() {
        let result = expected_frequencies(&table(vec![vec![0, 5], vec![0, 7]]));
        assert!(matches!(result, Err(AnalysisError::ZeroExpected { .. })));
    }

    #[test]
    fn test_chi2_sf_critical_value() {
        let p = chi2_sf(3.841_458_820_694_124, 1).unwrap();
        assert!((p - 0.05).abs() < 1e-6, "p = {}", p);
    }

    #[test]
    fn test_cramers_v_reuses_uncorrected_pearson() {
        let t = table(vec![vec![10, 20], vec![30, 40]]);
        let raw = chi2_contingency(&t, Divergence::Pearson, false).unwrap();
        let yates = chi2_contingency(&t, Divergence::Pearson, true).unwrap();
        let g = chi2_contingency(&t, Divergence::LogLikelihood, false).unwrap();

        let v = cramers_v_from_test(&t, &raw).unwrap();
        assert!((v - cramers_v(&t).unwrap()).abs() < 1e-12);
        assert!(cramers_v_from_test(&t, &yates).is_none());
        assert!(cramers_v_from_test(&t, &g).is_none());
    }
}
