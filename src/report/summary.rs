//! Run summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::ExtractionStats;

/// Record counts and timings of one analysis run
#[derive(Debug, Default, Clone, Serialize)]
pub struct AnalysisSummary {
    pub loaded_records: usize,
    pub category_records: usize,
    pub extraction: ExtractionStats,
    /// Gendered pairs left out of the tables for using undeclared labels
    pub undeclared_pairs: usize,
    #[serde(skip)]
    pub timings: Vec<(String, Duration)>,
}

impl AnalysisSummary {
    pub fn new(loaded_records: usize) -> Self {
        Self {
            loaded_records,
            ..Default::default()
        }
    }

    pub fn set_category_records(&mut self, count: usize) {
        self.category_records = count;
    }

    pub fn set_extraction(&mut self, stats: ExtractionStats) {
        self.extraction = stats;
    }

    pub fn set_undeclared_pairs(&mut self, count: usize) {
        self.undeclared_pairs = count;
    }

    /// Pairs that reach the contingency tables.
    pub fn tabulated_pairs(&self) -> usize {
        self.extraction.retained.saturating_sub(self.undeclared_pairs)
    }

    pub fn add_timing(&mut self, step: &str, elapsed: Duration) {
        self.timings.push((step.to_string(), elapsed));
    }

    pub fn total_time(&self) -> Duration {
        self.timings.iter().map(|(_, d)| *d).sum()
    }

    pub fn display(&self, category: &str) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("ANALYSIS SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Loaded entries"),
            Cell::new(self.loaded_records),
        ]);
        table.add_row(vec![
            Cell::new(format!("🏷️  Category '{}'", category)),
            Cell::new(self.category_records),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped (no gender tag)"),
            Cell::new(self.extraction.dropped()).fg(if self.extraction.dropped() == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("✅ Gendered pairs"),
            Cell::new(self.extraction.retained)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        if self.undeclared_pairs > 0 {
            table.add_row(vec![
                Cell::new("⚠️  Undeclared labels"),
                Cell::new(self.undeclared_pairs).fg(Color::Yellow),
            ]);
            table.add_row(vec![
                Cell::new("🧮 Tabulated pairs"),
                Cell::new(self.tabulated_pairs()).add_attribute(Attribute::Bold),
            ]);
        }
        table.add_row(vec![
            Cell::new("📈 Retention"),
            Cell::new(format!("{:.1}%", self.extraction.retention_ratio() * 100.0))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
        ]);

        for (step, elapsed) in &self.timings {
            table.add_row(vec![
                Cell::new(format!("⏱  {}", step)),
                Cell::new(format!("{:.2}s", elapsed.as_secs_f64())),
            ]);
        }

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_time_sums_steps() {
        let mut summary = AnalysisSummary::new(10);
        summary.add_timing("Load", Duration::from_millis(300));
        summary.add_timing("Extract", Duration::from_millis(200));
        assert_eq!(summary.total_time(), Duration::from_millis(500));
    }

    #[test]
    fn test_summary_serializes_counts() {
        let mut summary = AnalysisSummary::new(12);
        summary.set_category_records(8);
        summary.set_extraction(ExtractionStats {
            input: 8,
            retained: 5,
        });
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["loaded_records"], 12);
        assert_eq!(json["category_records"], 8);
        assert_eq!(json["extraction"]["retained"], 5);
        assert_eq!(json["undeclared_pairs"], 0);
        assert!(json.get("timings").is_none());
    }

    #[test]
    fn test_undeclared_pairs_reduce_tabulated_count() {
        let mut summary = AnalysisSummary::new(20);
        summary.set_extraction(ExtractionStats {
            input: 15,
            retained: 11,
        });
        summary.set_undeclared_pairs(3);

        assert_eq!(summary.tabulated_pairs(), 8);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["undeclared_pairs"], 3);
    }
}
