//! Dictionary loader for tab-separated exports

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Number of logical columns in a dictionary export.
pub const DICTIONARY_COLUMNS: usize = 4;

/// Column names assigned to the four logical fields, in file order.
pub const COLUMN_NAMES: [&str; DICTIONARY_COLUMNS] = ["source", "target", "category", "comment"];

/// One dictionary entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub source: String,
    pub target: String,
    pub category: String,
    pub comment: Option<String>,
}

impl Record {
    pub fn new(source: &str, target: &str, category: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            category: category.to_string(),
            comment: None,
        }
    }
}

/// Load a tab-separated dictionary into a DataFrame of four string columns.
///
/// The first `skip_lines` lines are treated as a header block and skipped.
/// Every field is read as a string with quoting disabled, since dictionary
/// text freely contains quote characters.
pub fn load_dictionary(path: &Path, skip_lines: usize) -> Result<DataFrame> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let parse_options = CsvParseOptions::default()
        .with_separator(b'\t')
        .with_quote_char(None);

    let mut df = CsvReadOptions::default()
        .with_has_header(false)
        .with_skip_rows(skip_lines)
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open dictionary file: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to parse dictionary file: {}", path.display()))?;

    if df.width() != DICTIONARY_COLUMNS {
        anyhow::bail!(
            "Expected {} tab-separated columns in {}, found {}",
            DICTIONARY_COLUMNS,
            path.display(),
            df.width()
        );
    }

    df.set_column_names(COLUMN_NAMES)
        .context("Failed to name dictionary columns")?;

    Ok(df)
}

/// Convert a loaded dictionary DataFrame into records.
///
/// Null text fields become empty strings; a null comment stays `None`.
pub fn dataframe_to_records(df: &DataFrame) -> Result<Vec<Record>> {
    let source = column_to_string_vec(df, "source")?;
    let target = column_to_string_vec(df, "target")?;
    let category = column_to_string_vec(df, "category")?;
    let comment = column_to_string_vec(df, "comment")?;

    let records = source
        .into_iter()
        .zip(target)
        .zip(category)
        .zip(comment)
        .map(|(((source, target), category), comment)| Record {
            source: source.unwrap_or_default(),
            target: target.unwrap_or_default(),
            category: category.unwrap_or_default(),
            comment: comment.filter(|c| !c.is_empty()),
        })
        .collect();

    Ok(records)
}

/// Load a dictionary file straight into records.
///
/// Returns the records together with the number of data rows read.
pub fn load_records(path: &Path, skip_lines: usize) -> Result<(Vec<Record>, usize)> {
    let df = load_dictionary(path, skip_lines)?;
    let rows = df.height();
    let records = dataframe_to_records(&df)?;
    Ok((records, rows))
}

fn column_to_string_vec(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?;
    let cast = column.cast(&DataType::String)?;
    let values = cast
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect();
    Ok(values)
}
