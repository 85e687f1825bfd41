//! Synth command implementation.

use anyhow::{Context, Result};
use console::style;

use hamsynth_qasm::QasmVersion;
use hamsynth_sim::{GroupOrder, Synthesizer};

use super::common::{load_hamiltonian, resolve_config, save_circuit};
use crate::cli::Settings;

/// Execute the synth command.
pub fn execute(
    input: &str,
    output: &str,
    steps: Option<usize>,
    max_steps: Option<usize>,
    order: Option<GroupOrder>,
    qasm2: bool,
    settings: &Settings,
) -> Result<()> {
    let mut config = resolve_config(settings)?;
    if steps.is_some() {
        config.steps = steps;
    }
    if let Some(max_steps) = max_steps {
        config.max_steps = max_steps;
    }
    if order.is_some() {
        config.order = order;
    }

    println!(
        "{} Synthesizing {} for t = {}",
        style("→").cyan().bold(),
        style(input).green(),
        style(config.time).yellow()
    );

    let hamiltonian = load_hamiltonian(input, config.qubit_order)?;
    println!(
        "  Loaded: {} terms on {} qubits",
        hamiltonian.n_terms(),
        hamiltonian.num_qubits()
    );

    let tolerance = config.tolerance;
    let synthesizer = Synthesizer::new(config)?;
    let report = synthesizer
        .run(&hamiltonian)
        .with_context(|| format!("Synthesis failed for {input}"))?;

    println!(
        "  {} groups, order {}, {} Trotter steps",
        report.num_groups, report.order, report.steps
    );

    let version = if qasm2 {
        QasmVersion::Qasm2
    } else {
        QasmVersion::Qasm3
    };
    save_circuit(&report.circuit, output, version)?;
    println!("{} Wrote {}", style("✓").green().bold(), style(output).green());

    match report.error {
        Some(error) if error <= tolerance => println!("error: {}", style(error).green()),
        Some(error) => println!("error: {}", style(error).red()),
        None => println!("error: {}", style("n/a (too many qubits to simulate)").dim()),
    }
    println!("depth: {}", report.depth);

    Ok(())
}
