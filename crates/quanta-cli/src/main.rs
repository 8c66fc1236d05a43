//! Quanta Command-Line Interface
//!
//! Terminal front end for the Quanta learning service: check the service,
//! browse the glossary, take a quiz, and build and simulate small circuits.
//!
//! ```text
//! $ quanta simulate -q 2 -g h:0 -g cx:0:1
//! q0: ─H──●─
//! q1: ────⊕─
//!
//! ✓ Results (1024 shots):
//!   00:    512 (50.00%) █████████████████████████
//!   11:    512 (50.00%) █████████████████████████
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use quanta_circuit::GateOperation;
use quanta_client::QuizLevel;

mod commands;

use commands::common::ConnectionArgs;
use commands::{builder, glossary, health, quiz, simulate, version};

/// Quanta - learn quantum computing from the terminal
#[derive(Parser)]
#[command(name = "quanta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Service root, e.g. http://localhost:5000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the service is reachable
    Health,

    /// Browse the glossary
    Glossary {
        /// Only show terms whose name or definition contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Terms per page
        #[arg(long, default_value = "10")]
        per_page: u32,
    },

    /// Take a multiple-choice quiz
    Quiz {
        /// Difficulty (beginner, intermediate, advanced, all)
        #[arg(short, long, default_value = "beginner")]
        level: QuizLevel,
    },

    /// Simulate a circuit given on the command line
    Simulate {
        /// Number of qubits (1-5)
        #[arg(short, long, default_value = "2")]
        qubits: u32,

        /// Gate to append, e.g. h:0, x:1, cx:0:1 (repeatable)
        #[arg(short, long = "gate", required = true)]
        gates: Vec<GateOperation>,

        /// Shot count to take percentages against
        #[arg(long)]
        shots: Option<u64>,

        /// Write the service's histogram image to this file
        #[arg(long)]
        save_visualization: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Build a circuit interactively
    Builder {
        /// Initial number of qubits (1-5)
        #[arg(short, long, default_value = "2")]
        qubits: u32,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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

    let connection = ConnectionArgs {
        config: cli.config,
        api_url: cli.api_url,
        timeout: cli.timeout,
    };

    // Execute command
    let result = match cli.command {
        Commands::Health => health::execute(&connection).await,

        Commands::Glossary {
            search,
            page,
            per_page,
        } => glossary::execute(&connection, search.as_deref(), page, per_page).await,

        Commands::Quiz { level } => quiz::execute(&connection, level).await,

        Commands::Simulate {
            qubits,
            gates,
            shots,
            save_visualization,
            format,
        } => {
            simulate::execute(
                &connection,
                qubits,
                gates,
                shots,
                save_visualization.as_deref(),
                &format,
            )
            .await
        }

        Commands::Builder { qubits } => builder::execute(&connection, qubits).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
