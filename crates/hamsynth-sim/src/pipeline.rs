//! End-to-end synthesis: group, diagonalize, Trotterize, optimize, measure.

use std::collections::BTreeMap;

use hamsynth_compile::passes::GateSetVerification;
use hamsynth_compile::{CompileError, GateSet, PassManager, PassManagerBuilder, PropertySet};
use hamsynth_ir::Circuit;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::approximation::{ErrorOptions, approximation_error};
use crate::config::SynthesisConfig;
use crate::error::{SimError, SimResult};
use crate::grouping::{Grouping, group_commuting};
use crate::hamiltonian::Hamiltonian;
use crate::statevector::MAX_SIM_QUBITS;
use crate::trotter::{GroupOrder, GroupedEvolution};

/// Outcome of [`Synthesizer::run`].
#[derive(Debug, Clone)]
pub struct SynthesisReport {
    /// Optimized circuit, single-qubit gates and `cx` only.
    pub circuit: Circuit,
    /// Trotter steps used.
    pub steps: usize,
    /// Estimated `‖exp(-itH) − U‖₂`; `None` when the register is too wide to
    /// simulate.
    pub error: Option<f64>,
    /// Circuit depth.
    pub depth: usize,
    /// Number of commuting groups.
    pub num_groups: usize,
    /// Group order used within each step.
    pub order: GroupOrder,
    /// Gate counts by name.
    pub gate_counts: BTreeMap<&'static str, usize>,
}

impl SynthesisReport {
    /// True if the error is known and at most `tolerance`.
    pub fn within_tolerance(&self, tolerance: f64) -> bool {
        self.error.is_some_and(|e| e <= tolerance)
    }
}

/// Diagnostics for an existing circuit.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Estimated `‖exp(-itH) − U‖₂`.
    pub error: f64,
    /// Circuit depth.
    pub depth: usize,
    /// Gate counts by name.
    pub gate_counts: BTreeMap<&'static str, usize>,
    /// Offending gate, if the circuit leaves the single-qubit + `cx` set.
    pub gate_set_violation: Option<String>,
}

/// Runs the synthesis pipeline for one configuration.
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    config: SynthesisConfig,
}

impl Synthesizer {
    /// Create a synthesizer, validating `config`.
    pub fn new(config: SynthesisConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration.
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Synthesize `exp(-i·time·H)`.
    ///
    /// With a fixed step count the circuit is built once. Otherwise step
    /// counts `1..=max_steps` are tried in turn and the first circuit within
    /// tolerance is returned.
    #[instrument(skip_all, fields(terms = h.n_terms(), qubits = h.num_qubits()))]
    pub fn run(&self, h: &Hamiltonian) -> SimResult<SynthesisReport> {
        let grouping = group_commuting(h, self.config.grouping)?;
        let order = match &self.config.order {
            Some(order) => {
                order.validate(grouping.len())?;
                order.clone()
            }
            None => GroupOrder::identity(grouping.len()),
        };
        info!(groups = grouping.len(), %order, "grouped Hamiltonian");

        let simulable = h.num_qubits() <= MAX_SIM_QUBITS;
        let options = self.config.error_options();

        if let Some(steps) = self.config.steps {
            let circuit = self.build(&grouping, &order, steps)?;
            let error = if simulable {
                Some(approximation_error(h, self.config.time, &circuit, &options)?.norm)
            } else {
                debug!("register too wide to simulate, skipping error estimate");
                None
            };
            return Ok(self.report(circuit, steps, error, &grouping, order));
        }

        if !simulable {
            return Err(SimError::TooManyQubits {
                n_qubits: h.num_qubits(),
                max: MAX_SIM_QUBITS,
            });
        }

        let mut best_error = f64::INFINITY;
        for steps in 1..=self.config.max_steps {
            let circuit = self.build(&grouping, &order, steps)?;
            let error = approximation_error(h, self.config.time, &circuit, &options)?.norm;
            info!(steps, error, depth = circuit.depth(), "evaluated step count");
            if error <= self.config.tolerance {
                return Ok(self.report(circuit, steps, Some(error), &grouping, order));
            }
            best_error = best_error.min(error);
        }
        Err(SimError::ToleranceNotMet {
            best_error,
            max_steps: self.config.max_steps,
        })
    }

    /// Build and optimize the circuit for a given order and step count.
    pub fn build(&self, grouping: &Grouping, order: &GroupOrder, steps: usize) -> SimResult<Circuit> {
        let circuit = GroupedEvolution::new(grouping, self.config.time, steps)
            .with_order(order.clone())
            .with_formula(self.config.formula)
            .circuit()?;
        optimize(circuit, self.config.optimization_level)
    }

    fn report(
        &self,
        circuit: Circuit,
        steps: usize,
        error: Option<f64>,
        grouping: &Grouping,
        order: GroupOrder,
    ) -> SynthesisReport {
        SynthesisReport {
            steps,
            error,
            depth: circuit.depth(),
            num_groups: grouping.len(),
            order,
            gate_counts: circuit.gate_counts(),
            circuit,
        }
    }
}

/// Run the peephole passes for `level`, then gate-set verification.
pub fn optimize(circuit: Circuit, level: u8) -> SimResult<Circuit> {
    let name = circuit.name().to_string();
    let before = circuit.num_ops();
    let (pm, mut props) = PassManagerBuilder::new()
        .with_optimization_level(level)
        .with_gate_set(GateSet::single_qubit_and_cx())
        .build();
    let mut dag = circuit.into_dag();
    pm.run(&mut dag, &mut props)?;
    debug!(
        level,
        before,
        after = dag.num_ops(),
        removed = props.stats.removed(),
        "optimized circuit"
    );
    Ok(Circuit::from_dag(dag).with_name(name))
}

/// Measure an existing circuit against `exp(-i·t·H)`.
pub fn evaluate(
    h: &Hamiltonian,
    t: f64,
    circuit: &Circuit,
    options: &ErrorOptions,
) -> SimResult<Evaluation> {
    let error = approximation_error(h, t, circuit, options)?.norm;

    let mut pm = PassManager::new();
    pm.add_pass(GateSetVerification);
    let mut props = PropertySet::new().with_gate_set(GateSet::single_qubit_and_cx());
    let mut dag = circuit.dag().clone();
    let gate_set_violation = match pm.run(&mut dag, &mut props) {
        Ok(()) => None,
        Err(CompileError::GateNotAllowed { gate, qubits }) => {
            Some(format!("{gate} on {qubits} qubits"))
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Evaluation {
        error,
        depth: circuit.depth(),
        gate_counts: circuit.gate_counts(),
        gate_set_violation,
    })
}
