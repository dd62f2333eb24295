//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static KEY: Emoji<'_, '_> = Emoji("🔑 ", "");
pub static COLUMNS: Emoji<'_, '_> = Emoji("🧮 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("tabprep").cyan().bold(),
        style("raw tables in, model-ready matrices out").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Values shown on the configuration card
pub struct ConfigCard<'a> {
    pub train: &'a Path,
    pub output_dir: &'a Path,
    pub id_column: &'a str,
    pub target: Option<&'a str>,
    pub numeric: usize,
    pub categorical: usize,
    pub drop_first: bool,
}

/// Print configuration card
pub fn print_config(card: &ConfigCard<'_>) {
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
        "    │  {} Train:    {:<37}│",
        FOLDER,
        truncate_path(card.train, 36)
    );
    println!(
        "    │  {} Output:   {:<37}│",
        SAVE,
        truncate_path(card.output_dir, 36)
    );
    println!(
        "    │  {} Id:       {:<37}│",
        KEY,
        truncate_string(card.id_column, 36)
    );
    println!(
        "    │  {} Target:   {:<37}│",
        TARGET,
        truncate_string(card.target.unwrap_or("(none)"), 36)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Columns:  {:<37}│",
        COLUMNS,
        style(format!(
            "{} numeric, {} categorical{}",
            card.numeric,
            card.categorical,
            if card.drop_first { ", drop first" } else { "" }
        ))
        .yellow()
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
    eprintln!("    {} {}", WARN, style(message).yellow());
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      {} {}", style(count).yellow().bold(), description);
    }
}

/// Print the final completion message
pub fn print_completion(failures: usize) {
    println!();
    if failures == 0 {
        println!(
            "    {} {}",
            ROCKET,
            style("tabprep run complete!").green().bold()
        );
    } else {
        println!(
            "    {} {}",
            WARN,
            style(format!("tabprep run finished with {} failed dataset(s)", failures))
                .red()
                .bold()
        );
    }
    println!();
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_keeps_tail() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("abcdefghijkl", 8), "...hijkl");
    }
}
