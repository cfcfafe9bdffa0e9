//! Contingency tables over declared label sets

use serde::Serialize;

use super::error::{AnalysisError, Axis};

/// Co-occurrence counts between two categorical variables.
///
/// Rows and columns are indexed by explicitly declared label orderings.
/// Counts are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// All-zero table over the given labels.
    pub fn zeros(row_labels: &[String], column_labels: &[String]) -> Self {
        Self {
            row_labels: row_labels.to_vec(),
            column_labels: column_labels.to_vec(),
            counts: vec![vec![0; column_labels.len()]; row_labels.len()],
        }
    }

    /// Build a table from explicit counts.
    pub fn from_counts(
        row_labels: &[String],
        column_labels: &[String],
        counts: Vec<Vec<u64>>,
    ) -> Result<Self, AnalysisError> {
        if counts.len() != row_labels.len() {
            return Err(AnalysisError::LengthMismatch {
                rows: counts.len(),
                columns: row_labels.len(),
            });
        }
        if let Some(row) = counts.iter().find(|r| r.len() != column_labels.len()) {
            return Err(AnalysisError::LengthMismatch {
                rows: row.len(),
                columns: column_labels.len(),
            });
        }

        Ok(Self {
            row_labels: row_labels.to_vec(),
            column_labels: column_labels.to_vec(),
            counts,
        })
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_labels.len(), self.column_labels.len())
    }

    pub fn is_two_by_two(&self) -> bool {
        self.shape() == (2, 2)
    }

    pub fn get(&self, row: usize, column: usize) -> u64 {
        self.counts[row][column]
    }

    /// Count for a pair of labels, `None` if either label is undeclared.
    pub fn count_for(&self, row_label: &str, column_label: &str) -> Option<u64> {
        let i = self.row_labels.iter().position(|l| l == row_label)?;
        let j = self.column_labels.iter().position(|l| l == column_label)?;
        Some(self.counts[i][j])
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|r| r.iter().sum::<u64>()).collect()
    }

    pub fn column_totals(&self) -> Vec<u64> {
        (0..self.column_labels.len())
            .map(|j| self.counts.iter().map(|r| r[j]).sum::<u64>())
            .collect()
    }

    /// True when row and column labels are identical and in the same order.
    pub fn is_aligned(&self) -> bool {
        self.row_labels == self.column_labels
    }

    /// Sum of the diagonal of an aligned table.
    pub fn diagonal_sum(&self) -> Result<u64, AnalysisError> {
        if !self.is_aligned() {
            return Err(AnalysisError::MisalignedLabels {
                rows: self.row_labels.clone(),
                columns: self.column_labels.clone(),
            });
        }
        Ok((0..self.row_labels.len()).map(|i| self.counts[i][i]).sum())
    }

    /// Each row's counts as a share of that row's total (0.0 for empty rows).
    pub fn row_proportions(&self) -> Vec<Vec<f64>> {
        self.counts
            .iter()
            .map(|row| {
                let total: u64 = row.iter().sum();
                row.iter()
                    .map(|&c| if total == 0 { 0.0 } else { c as f64 / total as f64 })
                    .collect()
            })
            .collect()
    }
}

/// Cross-tabulate two parallel label sequences.
///
/// `rows[k]` and `columns[k]` form one observation. The output ordering is
/// fixed by `row_labels` and `column_labels`, not by input order.
pub fn crosstab<R, C>(
    rows: &[R],
    columns: &[C],
    row_labels: &[String],
    column_labels: &[String],
) -> Result<ContingencyTable, AnalysisError>
where
    R: AsRef<str>,
    C: AsRef<str>,
{
    if rows.len() != columns.len() {
        return Err(AnalysisError::LengthMismatch {
            rows: rows.len(),
            columns: columns.len(),
        });
    }

    let mut table = ContingencyTable::zeros(row_labels, column_labels);

    for (row, column) in rows.iter().zip(columns.iter()) {
        let i = label_index(row.as_ref(), row_labels, Axis::Row)?;
        let j = label_index(column.as_ref(), column_labels, Axis::Column)?;
        table.counts[i][j] += 1;
    }

    Ok(table)
}

fn label_index(label: &str, declared: &[String], axis: Axis) -> Result<usize, AnalysisError> {
    declared
        .iter()
        .position(|l| l == label)
        .ok_or_else(|| AnalysisError::UnknownLabel {
            label: label.to_string(),
            axis,
            declared: declared.to_vec(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_counts_validates_shape() {
        let mf = labels(&["m", "f"]);
        assert!(ContingencyTable::from_counts(&mf, &mf, vec![vec![1, 2]]).is_err());
        assert!(ContingencyTable::from_counts(&mf, &mf, vec![vec![1, 2], vec![3]]).is_err());
        assert!(ContingencyTable::from_counts(&mf, &mf, vec![vec![1, 2], vec![3, 4]]).is_ok());
    }

    #[test]
    fn test_margins() {
        let mf = labels(&["m", "f"]);
        let table = ContingencyTable::from_counts(&mf, &mf, vec![vec![2, 1], vec![0, 1]]).unwrap();
        assert_eq!(table.row_totals(), vec![3, 1]);
        assert_eq!(table.column_totals(), vec![2, 2]);
        assert_eq!(table.total(), 4);
        assert_eq!(table.diagonal_sum().unwrap(), 3);
    }

    #[test]
    fn test_row_proportions_handles_empty_row() {
        let table = ContingencyTable::from_counts(
            &labels(&["m", "f", "n"]),
            &labels(&["m", "f"]),
            vec![vec![3, 1], vec![0, 0], vec![1, 1]],
        )
        .unwrap();
        let props = table.row_proportions();
        assert_eq!(props[0], vec![0.75, 0.25]);
        assert_eq!(props[1], vec![0.0, 0.0]);
        assert_eq!(props[2], vec![0.5, 0.5]);
    }

    #[test]
    fn test_diagonal_requires_alignment() {
        let table = ContingencyTable::zeros(&labels(&["m", "f"]), &labels(&["f", "m"]));
        assert!(matches!(
            table.diagonal_sum(),
            Err(AnalysisError::MisalignedLabels { .. })
        ));
    }
}
