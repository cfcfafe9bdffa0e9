//! Terminal rendering of contingency tables and their statistics

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{ContingencyTable, IndependenceTest, TableAnalysis};

/// Significance level used to colour p-values
const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Build the confusion-matrix table: counts with row percentages and margins.
pub fn contingency_table(table: &ContingencyTable, row_title: &str, column_title: &str) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec![Cell::new(format!("{} \\ {}", row_title, column_title))
        .add_attribute(Attribute::Bold)];
    header.extend(
        table
            .column_labels()
            .iter()
            .map(|l| Cell::new(l).add_attribute(Attribute::Bold)),
    );
    header.push(Cell::new("Total").add_attribute(Attribute::Bold));
    out.set_header(header);

    let proportions = table.row_proportions();
    let row_totals = table.row_totals();

    for (i, label) in table.row_labels().iter().enumerate() {
        let mut row = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        for (j, column_label) in table.column_labels().iter().enumerate() {
            let cell = Cell::new(format!(
                "{} ({:.1}%)",
                table.get(i, j),
                proportions[i][j] * 100.0
            ))
            .set_alignment(CellAlignment::Right);
            row.push(if label == column_label {
                cell.fg(Color::Green)
            } else {
                cell
            });
        }
        row.push(Cell::new(row_totals[i]).set_alignment(CellAlignment::Right));
        out.add_row(row);
    }

    let mut footer = vec![Cell::new("Total").add_attribute(Attribute::Bold)];
    footer.extend(
        table
            .column_totals()
            .into_iter()
            .map(|t| Cell::new(t).set_alignment(CellAlignment::Right)),
    );
    footer.push(
        Cell::new(table.total())
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    );
    out.add_row(footer);

    out
}

/// Build the statistics table for an analysis.
pub fn statistics_table(analysis: &TableAnalysis) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL_CONDENSED);
    out.set_header(vec![
        Cell::new("Statistic").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
        Cell::new("p-value").add_attribute(Attribute::Bold),
    ]);

    out.add_row(vec![
        Cell::new("Matthews / phi"),
        Cell::new(format!("{:.4}", analysis.matthews)),
        Cell::new("-"),
    ]);
    if let Some(v) = analysis.cramers_v {
        out.add_row(vec![
            Cell::new("Cramér's V"),
            Cell::new(format!("{:.4}", v)),
            Cell::new("-"),
        ]);
    }
    if let Some(ratio) = analysis.diagonal_ratio {
        out.add_row(vec![
            Cell::new("Diagonal agreement"),
            Cell::new(format!("{:.2}%", ratio * 100.0)),
            Cell::new("-"),
        ]);
    }

    for test in analysis.independence_tests() {
        out.add_row(independence_row(test));
    }
    if let Some(reason) = &analysis.skipped {
        out.add_row(vec![
            Cell::new("Chi-squared / G-test"),
            Cell::new("skipped").fg(Color::Yellow),
            Cell::new(reason).fg(Color::DarkGrey),
        ]);
    }

    if let Some(fisher) = analysis.fisher {
        out.add_row(vec![
            Cell::new("Fisher exact (odds ratio)"),
            Cell::new(format!("{:.4}", fisher.odds_ratio)),
            p_value_cell(fisher.p_value),
        ]);
    }

    out
}

/// Print a full analysis: heading, contingency table and statistics.
pub fn display_analysis(analysis: &TableAnalysis, row_title: &str, column_title: &str) {
    println!();
    println!(
        "    {} {}",
        style("▦").cyan(),
        style(analysis.name.to_uppercase()).white().bold()
    );
    println!();

    for line in contingency_table(&analysis.table, row_title, column_title)
        .to_string()
        .lines()
    {
        println!("    {}", line);
    }
    println!();
    for line in statistics_table(analysis).to_string().lines() {
        println!("    {}", line);
    }
}

fn independence_row(test: &IndependenceTest) -> Vec<Cell> {
    let name = if test.corrected {
        format!("{} (dof {}, Yates)", test.divergence, test.dof)
    } else {
        format!("{} (dof {})", test.divergence, test.dof)
    };
    vec![
        Cell::new(name),
        Cell::new(format!("{:.4}", test.statistic)),
        p_value_cell(test.p_value),
    ]
}

fn p_value_cell(p: f64) -> Cell {
    let cell = Cell::new(format_p_value(p));
    if p < SIGNIFICANCE_LEVEL {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        cell.fg(Color::Yellow)
    }
}

/// Format a p-value, switching to scientific notation for tiny values.
pub fn format_p_value(p: f64) -> String {
    if p != 0.0 && p < 1e-4 {
        format!("{:.3e}", p)
    } else {
        format!("{:.4}", p)
    }
}
