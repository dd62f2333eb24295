//! Interactive prompts using dialoguer

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::Confirm;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Ask before overwriting outputs that already exist.
///
/// Returns `true` when nothing exists or the user agreed.
pub fn confirm_overwrite(paths: &[PathBuf]) -> Result<bool> {
    let existing: Vec<&PathBuf> = paths.iter().filter(|p| p.exists()).collect();
    if existing.is_empty() {
        return Ok(true);
    }

    let listing = existing
        .iter()
        .map(|p| format!("  {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");
    confirm_step(&format!(
        "{} output file(s) already exist:\n{}\nOverwrite?",
        existing.len(),
        listing
    ))
}
