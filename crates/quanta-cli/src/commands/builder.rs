//! Interactive circuit builder.
//!
//! A line-oriented front end over [`CircuitSession`]. `run` starts the
//! simulation in the background, so the circuit stays editable while the
//! service works; a newer `run`, `reset` or qubit change supersedes it.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;

use quanta_circuit::{
    CircuitModel, CompletionOutcome, Denominator, GateKind, MAX_QUBITS, MIN_QUBITS, QubitIndex,
    diagram,
};
use quanta_client::CircuitSession;

use super::common::{ConnectionArgs, create_client, print_results};

/// One line of builder input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderCommand {
    Qubits(u32),
    Gate(GateKind),
    Add(QubitIndex),
    /// 1-based position as shown by `show`.
    Remove(usize),
    Reset,
    Show,
    Run,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<BuilderCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments for '{verb}'"));
    }

    let number = |what: &str| -> Result<u32, String> {
        arg.ok_or_else(|| format!("'{verb}' needs {what}"))?
            .parse()
            .map_err(|_| format!("'{}' is not a number", arg.unwrap_or_default()))
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "qubits" => BuilderCommand::Qubits(number("a qubit count")?),
        "gate" => {
            let name = arg.ok_or("'gate' needs a gate name (h, x, y, z, cx)")?;
            BuilderCommand::Gate(name.parse::<GateKind>().map_err(|e| e.to_string())?)
        }
        "add" => BuilderCommand::Add(QubitIndex(number("a qubit index")?)),
        "remove" | "rm" => {
            let position = number("a gate number")?;
            if position == 0 {
                return Err("gate numbers start at 1".to_string());
            }
            BuilderCommand::Remove(position as usize)
        }
        "reset" => BuilderCommand::Reset,
        "show" => BuilderCommand::Show,
        "run" => BuilderCommand::Run,
        "help" | "?" => BuilderCommand::Help,
        "quit" | "exit" => BuilderCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };

    let takes_arg = matches!(
        command,
        BuilderCommand::Qubits(_)
            | BuilderCommand::Gate(_)
            | BuilderCommand::Add(_)
            | BuilderCommand::Remove(_)
    );
    if !takes_arg && arg.is_some() {
        return Err(format!("'{verb}' takes no arguments"));
    }
    Ok(Some(command))
}

/// Execute the builder command.
pub async fn execute(args: &ConnectionArgs, qubits: u32) -> Result<()> {
    let (client, config) = create_client(args)?;
    let denominator = config.display.denominator();
    let base_url = client.base_url().to_string();
    let session = CircuitSession::with_model(CircuitModel::with_qubits(qubits)?, Arc::new(client));

    println!(
        "{} Circuit builder connected to {} (type 'help' for commands)",
        style("→").cyan().bold(),
        style(base_url).green()
    );
    show(&session, denominator).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Vec<JoinHandle<()>> = Vec::new();

    loop {
        print!("{} ", style("quanta>").cyan());
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        in_flight.retain(|handle| !handle.is_finished());

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{} {}", style("!").yellow().bold(), message);
                continue;
            }
        };

        let outcome = match command {
            BuilderCommand::Qubits(n) => session.set_qubit_count(n).await.map(|()| true),
            BuilderCommand::Gate(kind) => session.select_gate(kind).await.map(|()| false),
            BuilderCommand::Add(qubit) => session.add_gate(qubit).await.map(|op| {
                println!("  added {op}");
                true
            }),
            BuilderCommand::Remove(position) => {
                session.remove_gate(position - 1).await.map(|op| {
                    println!("  removed {op}");
                    true
                })
            }
            BuilderCommand::Reset => session.reset().await.map(|()| true),
            BuilderCommand::Show => {
                show(&session, denominator).await;
                Ok(false)
            }
            BuilderCommand::Run => {
                in_flight.push(spawn_simulation(session.clone(), denominator));
                Ok(false)
            }
            BuilderCommand::Help => {
                print_help();
                Ok(false)
            }
            BuilderCommand::Quit => break,
        };

        match outcome {
            Ok(true) => show(&session, denominator).await,
            Ok(false) => {}
            Err(e) => println!("{} {}", style("!").yellow().bold(), e),
        }
    }

    session.close().await;
    for handle in in_flight {
        handle.abort();
    }
    Ok(())
}

/// Start a simulation and report when it lands.
fn spawn_simulation(session: CircuitSession, denominator: Denominator) -> JoinHandle<()> {
    println!("  simulating...");
    tokio::spawn(async move {
        match session.simulate().await {
            Ok(CompletionOutcome::Applied) => {
                let state = session.snapshot().await;
                if let Some(result) = state.last_result() {
                    print_results(result, denominator);
                } else if let Some(error) = state.last_error() {
                    println!("\n{} {}", style("Error:").red().bold(), error);
                }
            }
            Ok(CompletionOutcome::Stale) => debug!("superseded simulation discarded"),
            Err(e) => println!("\n{} {}", style("!").yellow().bold(), e),
        }
    })
}

async fn show(session: &CircuitSession, denominator: Denominator) {
    let state = session.snapshot().await;

    println!(
        "\n{} qubits, placing {} ({})",
        state.qubit_count(),
        style(state.selected_gate()).cyan().bold(),
        state.selected_gate().description()
    );
    println!("{}", diagram::render(state.qubit_count(), state.operations()));

    if state.is_empty() {
        println!("{}", style("No gates yet. Use 'add <qubit>' to place one.").dim());
    }
    for (i, op) in state.operations().iter().enumerate() {
        println!("  {}. {}", i + 1, op);
    }

    if state.is_simulating() {
        println!("{}", style("Simulation in progress...").dim());
    } else if let Some(result) = state.last_result() {
        print_results(result, denominator);
    } else if let Some(error) = state.last_error() {
        println!("{} {}", style("Error:").red().bold(), error);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  qubits <n>    Set the qubit count ({MIN_QUBITS}-{MAX_QUBITS}); clears the circuit");
    println!("  gate <kind>   Select the gate to place (h, x, y, z, cx)");
    println!("  add <q>       Place the selected gate on qubit q (cx targets the next qubit)");
    println!("  remove <n>    Remove gate number n");
    println!("  reset         Remove all gates");
    println!("  show          Show the circuit and last result");
    println!("  run           Simulate in the background");
    println!("  quit          Leave the builder");
}
