//! Groups command implementation.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use hamsynth_sim::{GroupingStrategy, QubitOrder, group_commuting};

use super::common::load_hamiltonian;

#[derive(Serialize)]
struct GroupSummary {
    index: usize,
    size: usize,
    weight: f64,
    terms: Vec<TermSummary>,
}

#[derive(Serialize)]
struct TermSummary {
    coeff: f64,
    label: String,
}

#[derive(Serialize)]
struct GroupingSummary {
    n_qubits: u32,
    identity_coeff: f64,
    groups: Vec<GroupSummary>,
}

/// Execute the groups command.
pub fn execute(
    input: &str,
    strategy: GroupingStrategy,
    json: bool,
    big_endian: bool,
) -> Result<()> {
    let order = if big_endian {
        QubitOrder::BigEndian
    } else {
        QubitOrder::LittleEndian
    };
    let hamiltonian = load_hamiltonian(input, order)?;
    let grouping = group_commuting(&hamiltonian, strategy)?;

    let summary = GroupingSummary {
        n_qubits: grouping.n_qubits,
        identity_coeff: grouping.identity_coeff,
        groups: grouping
            .groups
            .iter()
            .enumerate()
            .map(|(index, group)| GroupSummary {
                index,
                size: group.len(),
                weight: group.weight(),
                terms: group
                    .terms()
                    .iter()
                    .map(|term| TermSummary {
                        coeff: term.coeff,
                        label: term.pauli.label(grouping.n_qubits, order),
                    })
                    .collect(),
            })
            .collect(),
    };

    if json {
        let out = serde_json::to_string_pretty(&summary).context("Failed to serialize groups")?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "{} {} terms in {} commuting groups",
        style("→").cyan().bold(),
        grouping.n_terms(),
        style(grouping.len()).yellow()
    );
    if summary.identity_coeff != 0.0 {
        println!("  identity coefficient: {}", summary.identity_coeff);
    }
    println!("  {:>5}  {:>5}  {:>12}", "group", "size", "weight");
    for group in &summary.groups {
        println!(
            "  {:>5}  {:>5}  {:>12.6}",
            style(group.index).cyan(),
            group.size,
            group.weight
        );
    }
    Ok(())
}
