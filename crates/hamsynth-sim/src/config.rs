//! Synthesis configuration.
//!
//! Every field has a default, so a YAML file only needs the values it
//! changes:
//!
//! ```yaml
//! time: 2.0
//! tolerance: 0.05
//! order: [3, 0, 2, 1]
//! formula: second-order
//! ```

use serde::{Deserialize, Serialize};

use crate::approximation::ErrorOptions;
use crate::error::{SimError, SimResult};
use crate::grouping::GroupingStrategy;
use crate::hamiltonian::QubitOrder;
use crate::trotter::{GroupOrder, ProductFormula};

/// Settings for [`crate::pipeline::Synthesizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisConfig {
    /// Evolution time t.
    pub time: f64,
    /// Largest acceptable `‖exp(-itH) − U‖₂`.
    pub tolerance: f64,
    /// Fixed Trotter step count; `None` searches `1..=max_steps`.
    pub steps: Option<usize>,
    /// Upper bound of the step search.
    pub max_steps: usize,
    /// Group order within a step; `None` keeps creation order.
    pub order: Option<GroupOrder>,
    /// Product formula.
    pub formula: ProductFormula,
    /// Greedy grouping strategy.
    pub grouping: GroupingStrategy,
    /// Peephole optimization level, 0 to 3.
    pub optimization_level: u8,
    /// Character order of Pauli labels in the input file.
    pub qubit_order: QubitOrder,
    /// Seed of the power-iteration start vector.
    pub seed: u64,
    /// Power-iteration cap.
    pub power_iterations: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            time: 1.0,
            tolerance: 0.1,
            steps: None,
            max_steps: 16,
            order: None,
            formula: ProductFormula::FirstOrder,
            grouping: GroupingStrategy::Sequential,
            optimization_level: 3,
            qubit_order: QubitOrder::LittleEndian,
            seed: 0,
            power_iterations: 200,
        }
    }
}

impl SynthesisConfig {
    /// Check value ranges.
    pub fn validate(&self) -> SimResult<()> {
        if !self.time.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "time must be finite, got {}",
                self.time
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if self.steps == Some(0) {
            return Err(SimError::InvalidSteps(0));
        }
        if self.steps.is_none() && self.max_steps == 0 {
            return Err(SimError::InvalidConfig(
                "max_steps must be at least 1".to_string(),
            ));
        }
        if self.optimization_level > 3 {
            return Err(SimError::InvalidConfig(format!(
                "optimization_level must be 0 to 3, got {}",
                self.optimization_level
            )));
        }
        if self.power_iterations == 0 {
            return Err(SimError::InvalidConfig(
                "power_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Power-iteration options derived from this configuration.
    pub fn error_options(&self) -> ErrorOptions {
        ErrorOptions {
            max_iterations: self.power_iterations,
            seed: self.seed,
            ..ErrorOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SynthesisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_steps, 16);
        assert_eq!(config.optimization_level, 3);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            SynthesisConfig {
                tolerance: -1.0,
                ..Default::default()
            },
            SynthesisConfig {
                time: f64::NAN,
                ..Default::default()
            },
            SynthesisConfig {
                max_steps: 0,
                ..Default::default()
            },
            SynthesisConfig {
                optimization_level: 4,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
        }
        let zero_steps = SynthesisConfig {
            steps: Some(0),
            ..Default::default()
        };
        assert!(matches!(zero_steps.validate(), Err(SimError::InvalidSteps(0))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SynthesisConfig =
            serde_json::from_str(r#"{"time": 2.0, "order": [1, 0], "formula": "second-order"}"#)
                .unwrap();
        assert_eq!(config.time, 2.0);
        assert_eq!(config.order, Some(GroupOrder::new(vec![1, 0])));
        assert_eq!(config.formula, ProductFormula::SecondOrder);
        assert_eq!(config.tolerance, 0.1);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(serde_json::from_str::<SynthesisConfig>(r#"{"tolerence": 0.2}"#).is_err());
    }
}
