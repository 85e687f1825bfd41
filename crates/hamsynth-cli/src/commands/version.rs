//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Trotterized circuit synthesis for Pauli Hamiltonians",
        style("hamsynth").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  hamsynth-ir       Circuit intermediate representation");
    println!("  hamsynth-qasm     OpenQASM 2.0/3.0 reader and writer");
    println!("  hamsynth-compile  Peephole optimization and gate-set checks");
    println!("  hamsynth-sim      Grouping, diagonalization and error estimation");
    println!("  hamsynth-cli      Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
