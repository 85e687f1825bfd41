//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use hamsynth_sim::{GroupOrder, GroupingStrategy, ProductFormula, QubitOrder, SynthesisConfig};

/// hamsynth - Trotterized circuit synthesis for Pauli Hamiltonians
#[derive(Parser, Debug)]
#[command(name = "hamsynth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize exp(-itH) as an OpenQASM circuit
    Synth {
        /// Hamiltonian file (one `coefficient label` term per line)
        #[arg(short, long)]
        input: String,

        /// Output QASM file
        #[arg(short, long)]
        output: String,

        /// Fixed number of Trotter steps (default: smallest within tolerance)
        #[arg(long)]
        steps: Option<usize>,

        /// Largest step count tried by the tolerance search
        #[arg(long)]
        max_steps: Option<usize>,

        /// Group order within a step, e.g. 3,0,2,1
        #[arg(long)]
        order: Option<GroupOrder>,

        /// Write OpenQASM 2.0 instead of 3.0
        #[arg(long)]
        qasm2: bool,

        #[command(flatten)]
        settings: Settings,
    },

    /// Check a QASM circuit against exp(-itH)
    Verify {
        /// Circuit file (OpenQASM 2.0 or 3.0)
        #[arg(short, long)]
        circuit: String,

        /// Hamiltonian file
        #[arg(short = 'H', long)]
        hamiltonian: String,

        /// YAML configuration file
        #[arg(long)]
        config: Option<String>,

        /// Evolution time
        #[arg(long)]
        time: Option<f64>,

        /// Largest acceptable error
        #[arg(long)]
        tolerance: Option<f64>,

        /// Read Pauli labels with the leftmost character as qubit 0
        #[arg(long)]
        big_endian: bool,
    },

    /// Show the commuting groups of a Hamiltonian
    Groups {
        /// Hamiltonian file
        #[arg(short, long)]
        input: String,

        /// Grouping strategy (sequential, largest-first)
        #[arg(long, default_value = "sequential")]
        grouping: GroupingStrategy,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Read Pauli labels with the leftmost character as qubit 0
        #[arg(long)]
        big_endian: bool,
    },

    /// Search random group orders for the lowest error
    Search {
        /// Hamiltonian file
        #[arg(short, long)]
        input: String,

        /// Random orders to evaluate besides the creation order
        #[arg(long, default_value = "20")]
        trials: usize,

        /// Seed for the random orders
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Trotter steps per candidate
        #[arg(long, default_value = "1")]
        steps: usize,

        #[command(flatten)]
        settings: Settings,
    },

    /// Show version information
    Version,
}

/// Synthesis settings shared by `synth` and `search`, layered over the
/// optional YAML file.
#[derive(Args, Debug, Default)]
pub struct Settings {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Evolution time
    #[arg(long)]
    pub time: Option<f64>,

    /// Largest acceptable error
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Use the symmetric second-order product formula
    #[arg(long)]
    pub second_order: bool,

    /// Grouping strategy (sequential, largest-first)
    #[arg(long)]
    pub grouping: Option<GroupingStrategy>,

    /// Optimization level (0-3)
    #[arg(long)]
    pub optimization_level: Option<u8>,

    /// Read Pauli labels with the leftmost character as qubit 0
    #[arg(long)]
    pub big_endian: bool,
}

impl Settings {
    /// Overwrite the fields of `config` that were given on the command line.
    pub fn apply(&self, config: &mut SynthesisConfig) {
        if let Some(time) = self.time {
            config.time = time;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if self.second_order {
            config.formula = ProductFormula::SecondOrder;
        }
        if let Some(grouping) = self.grouping {
            config.grouping = grouping;
        }
        if let Some(level) = self.optimization_level {
            config.optimization_level = level;
        }
        if self.big_endian {
            config.qubit_order = QubitOrder::BigEndian;
        }
    }
}
