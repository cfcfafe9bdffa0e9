//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TAG: Emoji<'_, '_> = Emoji("🏷️  ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static BOOK: Emoji<'_, '_> = Emoji("📖 ", "");
pub static SCALE: Emoji<'_, '_> = Emoji("⚖️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ██████  ███████ ███    ██ ██    ██ ███████
    ██       ██      ████   ██ ██    ██ ██
    ██   ███ █████   ██ ██  ██ ██    ██ ███████
    ██    ██ ██      ██  ██ ██ ██    ██      ██
     ██████  ███████ ██   ████  ██████  ███████
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("♂♀").magenta().bold(),
        style("Grammatical gender correlation across languages").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Configuration shown before the run
pub struct RunSettings<'a> {
    pub input: &'a Path,
    pub category: &'a str,
    pub skip_lines: usize,
    pub languages: (&'a str, &'a str),
    pub report: Option<&'a Path>,
    pub correction: bool,
}

/// Print configuration card
pub fn print_config(settings: &RunSettings) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:     {:<36}│",
        FOLDER,
        truncate_path(settings.input, 35)
    );
    println!(
        "    │  {} Languages: {:<36}│",
        BOOK,
        truncate_string(
            &format!("{} → {}", settings.languages.0, settings.languages.1),
            35
        )
    );
    let report = settings
        .report
        .map(|p| truncate_path(p, 35))
        .unwrap_or_else(|| "(not exported)".to_string());
    println!("    │  {} Report:    {:<36}│", SAVE, report);
    println!("    ├{}┤", line);
    println!(
        "    │  {} Category:          {:<28}│",
        TAG,
        style(truncate_string(settings.category, 27)).yellow()
    );
    println!(
        "    │  {} Header lines:      {:<28}│",
        INFO,
        style(settings.skip_lines).yellow()
    );
    println!(
        "    │  {} Yates correction:  {:<28}│",
        SCALE,
        style(if settings.correction { "on" } else { "off" }).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning to stderr
pub fn print_warning(message: &str) {
    eprintln!("    {} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Print how long a step took
pub fn print_step_time(elapsed: Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Genus analysis complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(count - max_len + 3).collect();
        format!("...{}", tail)
    }
}
