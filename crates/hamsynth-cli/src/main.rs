//! hamsynth Command-Line Interface
//!
//! ```text
//! hamsynth synth  -i H.txt -o out.qasm --time 1.0 --tolerance 0.1
//! hamsynth verify -c out.qasm -H H.txt --time 1.0
//! hamsynth groups -i H.txt --json
//! hamsynth search -i H.txt --trials 50 --seed 7 --steps 2
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{groups, search, synth, verify, version};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Synth {
            input,
            output,
            steps,
            max_steps,
            order,
            qasm2,
            settings,
        } => synth::execute(&input, &output, steps, max_steps, order, qasm2, &settings),

        Commands::Verify {
            circuit,
            hamiltonian,
            config,
            time,
            tolerance,
            big_endian,
        } => verify::execute(
            &circuit,
            &hamiltonian,
            config.as_deref(),
            time,
            tolerance,
            big_endian,
        ),

        Commands::Groups {
            input,
            grouping,
            json,
            big_endian,
        } => groups::execute(&input, grouping, json, big_endian),

        Commands::Search {
            input,
            trials,
            seed,
            steps,
            settings,
        } => search::execute(&input, trials, seed, steps, &settings),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
