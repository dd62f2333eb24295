//! Run summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{DatasetReport, PipelineRun};

/// Build the per-dataset summary table
pub fn summary_table(datasets: &[DatasetReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Dataset").add_attribute(Attribute::Bold),
        Cell::new("Rows").add_attribute(Attribute::Bold),
        Cell::new("Columns").add_attribute(Attribute::Bold),
        Cell::new("Target").add_attribute(Attribute::Bold),
        Cell::new("Unseen rows").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
    ]);

    for report in datasets {
        match &report.result {
            Ok(summary) => {
                let unseen: usize = summary.unseen.iter().map(|(_, u)| u.rows).sum();
                table.add_row(vec![
                    Cell::new(report.kind.label()),
                    Cell::new(summary.rows),
                    Cell::new(summary.columns),
                    Cell::new(if summary.has_target { "yes" } else { "no" }),
                    Cell::new(unseen).fg(if unseen == 0 {
                        Color::White
                    } else {
                        Color::Yellow
                    }),
                    Cell::new("✅ exported").fg(Color::Green),
                ]);
            }
            Err(message) => {
                table.add_row(vec![
                    Cell::new(report.kind.label()),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(format!("❌ {}", message)).fg(Color::Red),
                ]);
            }
        }
    }

    table
}

/// Print the summary of a finished run
pub fn display_run_summary(run: &PipelineRun) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("RUN SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    // Indent the table
    for line in summary_table(&run.datasets).to_string().lines() {
        println!("    {}", line);
    }

    println!();
    println!(
        "      {} feature column(s), state at {}",
        style(run.state.feature_count()).yellow().bold(),
        style(run.state_path.display()).dim()
    );

    for report in &run.datasets {
        if report.result.is_ok() {
            println!(
                "        {} {}",
                style("•").dim(),
                report.output.display()
            );
        }
    }
}
