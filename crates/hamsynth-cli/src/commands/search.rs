//! Search command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use hamsynth_sim::OrderSearch;

use super::common::{load_hamiltonian, resolve_config};
use crate::cli::Settings;

/// Execute the search command.
pub fn execute(
    input: &str,
    trials: usize,
    seed: u64,
    steps: usize,
    settings: &Settings,
) -> Result<()> {
    let config = resolve_config(settings)?;
    let hamiltonian = load_hamiltonian(input, config.qubit_order)?;

    println!(
        "{} Searching {} group orders for {} ({} steps, t = {})",
        style("→").cyan().bold(),
        trials + 1,
        style(input).green(),
        steps,
        config.time
    );

    let progress = ProgressBar::new((trials + 1) as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let search = OrderSearch::new(trials, seed, steps);
    let mut best_error = f64::INFINITY;
    let result = search.run_with_observer(&hamiltonian, &config, |candidate| {
        best_error = best_error.min(candidate.error);
        progress.set_message(format!("best error {best_error:.6}"));
        progress.inc(1);
    });
    progress.finish_and_clear();
    let result = result?;

    println!(
        "{} Evaluated {} orders",
        style("✓").green().bold(),
        result.evaluated
    );
    println!("order: {}", style(&result.best.order).yellow());
    println!("error: {}", result.best.error);
    println!("depth: {}", result.best.depth);
    Ok(())
}
