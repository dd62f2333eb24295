//! tabprep: Feature Transformation CLI Tool
//!
//! Fits the column transformer on a training table and exports
//! schema-compatible matrices for training, validation and scoring.

use anyhow::Result;
use clap::Parser;

use tabprep::cli::{confirm_overwrite, transformed_output_path, Cli, Commands, FitArgs};
use tabprep::pipeline::{apply_saved_state, load_state, run_pipeline};
use tabprep::report::{display_run_summary, display_state};
use tabprep::utils::{
    print_banner, print_completion, print_config, print_info, print_step_header, print_success,
    ConfigCard,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fit(args) => run_fit(&args),
        Commands::Apply {
            state,
            input,
            output,
            kind,
            infer_schema_length,
            no_confirm,
        } => {
            let output = output.unwrap_or_else(|| transformed_output_path(&input));
            if !no_confirm && !confirm_overwrite(std::slice::from_ref(&output))? {
                println!("Cancelled by user.");
                return Ok(());
            }

            print_banner(env!("CARGO_PKG_VERSION"));
            print_step_header(1, &format!("Apply saved state to {} data", kind));
            let (_, summary) = apply_saved_state(
                &state,
                &input,
                &output,
                kind,
                infer_schema_length,
            )?;
            print_success(&format!(
                "{} rows × {} columns{}",
                summary.rows,
                summary.columns,
                if summary.has_target {
                    " (target attached)"
                } else {
                    ""
                }
            ));
            print_completion(0);
            Ok(())
        }
        Commands::Inspect { state } => {
            let state = load_state(&state)?;
            display_state(&state);
            Ok(())
        }
    }
}

fn run_fit(args: &FitArgs) -> Result<()> {
    let config = args.pipeline_config()?;

    if !args.no_confirm && !confirm_overwrite(&config.planned_outputs())? {
        println!("Cancelled by user.");
        return Ok(());
    }

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&ConfigCard {
        train: &config.train,
        output_dir: &config.output_dir,
        id_column: &config.columns.id_column,
        target: config.columns.target_column.as_deref(),
        numeric: config.columns.numeric.len(),
        categorical: config.columns.categorical.len(),
        drop_first: config.columns.drop_first,
    });

    if config.validation.is_none() && config.score.is_none() {
        print_info("No validation or scoring dataset given; only the training matrix is exported");
    }

    let run = run_pipeline(&config)?;
    display_run_summary(&run);

    let failures = run.failures();
    print_completion(failures);

    if failures > 0 {
        anyhow::bail!("{} dataset(s) failed to transform", failures);
    }
    Ok(())
}
