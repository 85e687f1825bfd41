//! `PropertySet` and related types for pass communication.
//!
//! Passes share data through a [`PropertySet`]: the allowed gate set that
//! verification checks against, optimization statistics written by the
//! peephole passes, and arbitrary custom properties keyed by type.
//!
//! # Examples
//!
//! ```
//! use hamsynth_compile::{GateSet, PropertySet};
//!
//! let props = PropertySet::new().with_gate_set(GateSet::single_qubit_and_cx());
//! let gates = props.gate_set.as_ref().unwrap();
//! assert!(gates.allows("rz", 1));
//! assert!(gates.allows("cx", 2));
//! assert!(!gates.allows("cz", 2));
//! ```
//!
//! Custom properties:
//!
//! ```
//! use hamsynth_compile::PropertySet;
//!
//! #[derive(Debug, PartialEq)]
//! struct BlockCount(usize);
//!
//! let mut props = PropertySet::new();
//! props.insert(BlockCount(12));
//! assert_eq!(props.get::<BlockCount>(), Some(&BlockCount(12)));
//! ```

use std::any::{Any, TypeId};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// The gates a compiled circuit may contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Every single-qubit gate is allowed when set.
    any_single_qubit: bool,
    /// Explicitly allowed gate names.
    names: FxHashSet<String>,
}

impl GateSet {
    /// Create a gate set from explicit gate names.
    pub fn from_names(names: &[&str]) -> Self {
        Self {
            any_single_qubit: false,
            names: names.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Arbitrary single-qubit gates plus CNOT.
    pub fn single_qubit_and_cx() -> Self {
        Self {
            any_single_qubit: true,
            names: ["cx".to_string()].into_iter().collect(),
        }
    }

    /// Check whether a gate with this name and arity is allowed.
    pub fn allows(&self, name: &str, num_qubits: usize) -> bool {
        (self.any_single_qubit && num_qubits == 1) || self.names.contains(name)
    }
}

impl Default for GateSet {
    fn default() -> Self {
        Self::single_qubit_and_cx()
    }
}

/// Running totals written by the optimization passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationStats {
    /// Gates removed by inverse-pair cancellation.
    pub cancelled: usize,
    /// Rotations absorbed into a neighbour or dropped as zero-angle.
    pub merged: usize,
}

impl OptimizationStats {
    /// Total number of removed gates.
    pub fn removed(&self) -> usize {
        self.cancelled + self.merged
    }
}

/// Properties shared between passes.
#[derive(Default)]
pub struct PropertySet {
    /// Gate set checked by [`crate::passes::GateSetVerification`].
    pub gate_set: Option<GateSet>,

    /// Statistics accumulated by the optimization passes.
    pub stats: OptimizationStats,

    /// Custom properties storage (type-erased).
    custom: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gate set to verify against.
    #[must_use]
    pub fn with_gate_set(mut self, gate_set: GateSet) -> Self {
        self.gate_set = Some(gate_set);
        self
    }

    /// Insert a custom property.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.custom.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a custom property.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.custom
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref())
    }

    /// Get a mutable custom property.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.custom
            .get_mut(&TypeId::of::<T>())
            .and_then(|v| v.downcast_mut())
    }

    /// Remove a custom property.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.custom
            .remove(&TypeId::of::<T>())
            .and_then(|v| v.downcast().ok())
            .map(|v| *v)
    }
}

impl std::fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertySet")
            .field("gate_set", &self.gate_set)
            .field("stats", &self.stats)
            .field("custom", &self.custom.len())
            .finish()
    }
}
