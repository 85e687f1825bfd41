//! Verify command implementation.

use anyhow::Result;
use console::style;

use hamsynth_sim::{QubitOrder, evaluate};

use super::common::{load_circuit, load_config, load_hamiltonian};

/// Execute the verify command.
///
/// Fails if the measured error exceeds the tolerance.
pub fn execute(
    circuit_path: &str,
    hamiltonian_path: &str,
    config_path: Option<&str>,
    time: Option<f64>,
    tolerance: Option<f64>,
    big_endian: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(time) = time {
        config.time = time;
    }
    if let Some(tolerance) = tolerance {
        config.tolerance = tolerance;
    }
    if big_endian {
        config.qubit_order = QubitOrder::BigEndian;
    }
    config.validate()?;

    println!(
        "{} Verifying {} against {}",
        style("→").cyan().bold(),
        style(circuit_path).green(),
        style(hamiltonian_path).green()
    );

    let circuit = load_circuit(circuit_path)?;
    let hamiltonian = load_hamiltonian(hamiltonian_path, config.qubit_order)?;
    println!(
        "  Loaded: {} qubits, {} ops, {} terms",
        circuit.num_qubits(),
        circuit.num_ops(),
        hamiltonian.n_terms()
    );

    let evaluation = evaluate(&hamiltonian, config.time, &circuit, &config.error_options())?;

    println!("error: {}", evaluation.error);
    println!("depth: {}", evaluation.depth);
    let counts: Vec<String> = evaluation
        .gate_counts
        .iter()
        .map(|(name, count)| format!("{name}={count}"))
        .collect();
    println!("gates: {}", counts.join(" "));
    match &evaluation.gate_set_violation {
        None => println!("gate set: {}", style("single-qubit + cx").green()),
        Some(violation) => println!("gate set: {} ({violation})", style("violated").red()),
    }

    if evaluation.error > config.tolerance {
        anyhow::bail!(
            "error {} exceeds tolerance {}",
            evaluation.error,
            config.tolerance
        );
    }
    println!("{} Within tolerance {}", style("✓").green().bold(), config.tolerance);
    Ok(())
}
