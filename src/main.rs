//! Genus: Grammatical Gender Correlation CLI Tool
//!
//! A command-line tool that cross-tabulates the grammatical genders of
//! dictionary noun pairs and tests the two gender systems for independence.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use genus::cli::{AnalysisConfig, Cli};
use genus::pipeline::{
    analyze_pairs, filter_by_category, load_records, retain_declared, TableAnalysis,
};
use genus::report::{display_analysis, export_analysis, AnalysisSummary, ExportParams};
use genus::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success, print_warning,
    RunSettings,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };
    let extractor = config.extractor()?;
    let grouping = config.grouping()?;
    let report_path = cli.report_path();
    let correction = cli.correction();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(&RunSettings {
        input: &cli.input,
        category: &cli.category,
        skip_lines: cli.skip_lines,
        languages: (
            config.source_language.as_str(),
            config.target_language.as_str(),
        ),
        report: report_path.as_deref(),
        correction,
    });

    // Step 1: Load dictionary
    print_step_header(1, "Load Dictionary");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading dictionary entries...");
    let (records, rows) = load_records(&cli.input, cli.skip_lines)?;
    finish_with_success(&spinner, "Dictionary loaded");
    println!("      Entries: {}", rows);

    let mut summary = AnalysisSummary::new(rows);
    let elapsed = step_start.elapsed();
    summary.add_timing("Load", elapsed);
    print_step_time(elapsed);

    // Step 2: Category filter
    print_step_header(2, "Category Filter");

    let step_start = Instant::now();
    let selected = filter_by_category(&records, &cli.category);
    drop(records);
    summary.set_category_records(selected.len());

    if selected.is_empty() {
        anyhow::bail!(
            "No entries with category '{}' found in {}",
            cli.category,
            cli.input.display()
        );
    }
    print_count(
        "entries",
        selected.len(),
        Some(&format!("(category '{}')", cli.category)),
    );
    let elapsed = step_start.elapsed();
    summary.add_timing("Filter", elapsed);
    print_step_time(elapsed);

    // Step 3: Gender extraction
    print_step_header(3, "Gender Extraction");

    let step_start = Instant::now();
    let (nouns, stats) = extractor.extract_all(&selected);
    summary.set_extraction(stats);

    print_count(
        "gendered pair(s)",
        stats.retained,
        Some(&format!("of {} ({} dropped)", stats.input, stats.dropped())),
    );

    let (nouns, undeclared) =
        retain_declared(nouns, &config.source_labels, &config.target_labels);
    summary.set_undeclared_pairs(undeclared);
    if undeclared > 0 {
        print_warning(&format!(
            "Skipped {} pair(s) with labels outside {:?} / {:?}",
            undeclared, config.source_labels, config.target_labels
        ));
    }
    if nouns.is_empty() {
        anyhow::bail!("No entries carry a gender tag on both sides; nothing to analyze");
    }
    print_success("Gender labels extracted");
    let elapsed = step_start.elapsed();
    summary.add_timing("Extract", elapsed);
    print_step_time(elapsed);

    // Step 4: Full gender systems
    print_step_header(4, "Cross-tabulation");

    let step_start = Instant::now();
    let full = analyze_pairs(
        "Full gender systems",
        &nouns,
        &config.source_labels,
        &config.target_labels,
        correction,
    )?;
    display_analysis(&full, &config.source_language, &config.target_language);
    warn_if_skipped(&full);
    let elapsed = step_start.elapsed();
    summary.add_timing("Cross-tabulate", elapsed);
    print_step_time(elapsed);

    // Step 5: Grouped gender systems
    print_step_header(5, "Grouped Cross-tabulation");

    let step_start = Instant::now();
    let grouped_nouns = grouping
        .group_sources(&nouns)
        .context("Failed to group source genders")?;
    let grouped = analyze_pairs(
        "Grouped gender systems",
        &grouped_nouns,
        &config.grouped_labels,
        &config.target_labels,
        correction,
    )?;
    display_analysis(&grouped, &config.source_language, &config.target_language);
    warn_if_skipped(&grouped);

    if grouped.fisher.is_none() {
        print_info("Fisher's exact test skipped (grouped table is not 2x2)");
    }
    let elapsed = step_start.elapsed();
    summary.add_timing("Group", elapsed);
    print_step_time(elapsed);

    // Step 6: Save report
    let analyses = [full, grouped];
    if let Some(path) = &report_path {
        print_step_header(6, "Save Report");

        let step_start = Instant::now();
        let spinner = create_spinner("Writing analysis report...");
        export_analysis(
            &analyses,
            &summary,
            &config,
            path,
            &ExportParams {
                input_file: &cli.input.display().to_string(),
                category: &cli.category,
                skip_lines: cli.skip_lines,
                correction,
            },
        )?;
        finish_with_success(&spinner, &format!("Saved to {}", path.display()));
        let elapsed = step_start.elapsed();
        summary.add_timing("Save", elapsed);
        print_step_time(elapsed);
    }

    // Display summary
    summary.display(&cli.category);
    println!(
        "\n    {} Total time: {:.2}s",
        style("✧").cyan(),
        summary.total_time().as_secs_f64()
    );

    // Final completion message
    print_completion();

    Ok(())
}

fn warn_if_skipped(analysis: &TableAnalysis) {
    if let Some(reason) = &analysis.skipped {
        print_warning(&format!(
            "{}: chi-squared and G-test skipped ({})",
            analysis.name, reason
        ));
    }
}
