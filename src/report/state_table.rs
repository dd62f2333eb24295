//! Tabular view of a fitted transform state

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};
use console::style;

use crate::pipeline::TransformState;

/// Numeric column statistics: fill value, mean, standard deviation
pub fn numeric_table(state: &TransformState) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Numeric column").add_attribute(Attribute::Bold),
        Cell::new("Fill").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("Std dev").add_attribute(Attribute::Bold),
    ]);

    for col in state.numeric() {
        let std_dev = if col.scale.std_dev == 0.0 {
            "0 (constant)".to_string()
        } else {
            format!("{:.4}", col.scale.std_dev)
        };
        table.add_row(vec![
            Cell::new(&col.name),
            Cell::new(format!("{:.4}", col.fill_value)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", col.scale.mean)).set_alignment(CellAlignment::Right),
            Cell::new(std_dev).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Categorical column layout: categories, indicator width, relabeling
pub fn categorical_table(state: &TransformState) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Categorical column").add_attribute(Attribute::Bold),
        Cell::new("Categories").add_attribute(Attribute::Bold),
        Cell::new("Indicators").add_attribute(Attribute::Bold),
        Cell::new("Relabeled").add_attribute(Attribute::Bold),
    ]);

    for col in state.categorical() {
        let mut categories = col.categories.categories().join(", ");
        if col.categories.drop_first() {
            categories.push_str(" (first dropped)");
        }
        table.add_row(vec![
            Cell::new(&col.name),
            Cell::new(categories),
            Cell::new(col.categories.width()).set_alignment(CellAlignment::Right),
            Cell::new(if state.relabel().has_column(&col.name) {
                "yes"
            } else {
                "no"
            }),
        ]);
    }

    table
}

/// Print a fitted state for inspection
pub fn display_state(state: &TransformState) {
    println!();
    println!(
        "    {} {}",
        style("🔎").cyan(),
        style("TRANSFORM STATE").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!(
        "      Fitted on {} rows at {} (tabprep v{})",
        style(state.fitted_rows()).yellow(),
        state.fitted_at(),
        state.version()
    );
    println!("      Identifier: {}", style(state.id_column()).cyan());
    println!(
        "      Target:     {}",
        style(state.target_column().unwrap_or("(none)")).cyan()
    );
    if let Some(mapping) = state.target_mapping() {
        println!(
            "      Mapping:    '{}' → 1, '{}' → 0",
            mapping.event_value, mapping.non_event_value
        );
    }
    println!();

    if !state.numeric().is_empty() {
        for line in numeric_table(state).to_string().lines() {
            println!("    {}", line);
        }
        println!();
    }

    if !state.categorical().is_empty() {
        for line in categorical_table(state).to_string().lines() {
            println!("    {}", line);
        }
        println!();
    }

    println!(
        "      {} output feature column(s)",
        style(state.feature_count()).yellow().bold()
    );
}
