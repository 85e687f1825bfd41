//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use hamsynth_ir::Circuit;
use hamsynth_qasm::{QasmVersion, emit_version, parse};
use hamsynth_sim::{Hamiltonian, QubitOrder, SynthesisConfig, parse_hamiltonian};

use crate::cli::Settings;

/// Read a file, failing early with a clear message if it does not exist.
fn read_source(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Load a Hamiltonian from a text file of weighted Pauli labels.
pub fn load_hamiltonian(path: &str, order: QubitOrder) -> Result<Hamiltonian> {
    let source = read_source(path)?;
    let hamiltonian = parse_hamiltonian(&source, order)
        .with_context(|| format!("Invalid Hamiltonian file: {path}"))?;
    info!(
        path,
        terms = hamiltonian.n_terms(),
        qubits = hamiltonian.num_qubits(),
        "loaded Hamiltonian"
    );
    Ok(hamiltonian)
}

/// Load a circuit from an OpenQASM 2.0 or 3.0 file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    let source = read_source(path)?;
    let circuit = parse(&source).map_err(|e| anyhow::anyhow!("Parse error in {path}: {e}"))?;
    info!(
        path,
        qubits = circuit.num_qubits(),
        ops = circuit.num_ops(),
        "loaded circuit"
    );
    Ok(circuit)
}

/// Write a circuit as OpenQASM.
pub fn save_circuit(circuit: &Circuit, path: &str, version: QasmVersion) -> Result<()> {
    let content =
        emit_version(circuit, version).map_err(|e| anyhow::anyhow!("Emit error: {e}"))?;
    fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
    info!(path, ?version, "wrote circuit");
    Ok(())
}

/// Load the YAML configuration, or the defaults if no file is given.
pub fn load_config(path: Option<&str>) -> Result<SynthesisConfig> {
    let Some(path) = path else {
        return Ok(SynthesisConfig::default());
    };
    let source = read_source(path)?;
    debug!(path, "reading configuration");
    serde_yaml_ng::from_str(&source).with_context(|| format!("Invalid configuration file: {path}"))
}

/// The YAML configuration with command-line settings applied on top.
pub fn resolve_config(settings: &Settings) -> Result<SynthesisConfig> {
    let mut config = load_config(settings.config.as_deref())?;
    settings.apply(&mut config);
    config.validate()?;
    Ok(config)
}
