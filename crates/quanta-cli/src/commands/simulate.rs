//! Simulate command implementation.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use console::style;

use quanta_circuit::{CircuitModel, Denominator, GateOperation, diagram};
use quanta_client::CircuitSession;

use super::common::{ConnectionArgs, create_client, print_results, spinner};

/// Execute the simulate command.
pub async fn execute(
    args: &ConnectionArgs,
    qubits: u32,
    gates: Vec<GateOperation>,
    shots: Option<u64>,
    save_visualization: Option<&Path>,
    format: &str,
) -> Result<()> {
    let json = match format.to_lowercase().as_str() {
        "table" => false,
        "json" => true,
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    };

    let mut model = CircuitModel::with_qubits(qubits)?;
    for gate in gates {
        model.push_operation(gate)?;
    }

    let (client, config) = create_client(args)?;
    let denominator = match shots {
        Some(n) if n > 0 => Denominator::Shots(n),
        _ => config.display.denominator(),
    };

    if !json {
        println!(
            "{} Simulating {} gates on {} qubits at {}",
            style("→").cyan().bold(),
            model.len(),
            model.qubit_count(),
            style(client.base_url()).green()
        );
        println!("\n{}", diagram::render(model.qubit_count(), model.operations()));
    }

    let session = CircuitSession::with_model(model, Arc::new(client));
    let progress = spinner("Running simulation...");
    let outcome = session.simulate().await;
    progress.finish_and_clear();
    outcome?;

    let state = session.snapshot().await;
    let result = match (state.last_result(), state.last_error()) {
        (Some(result), _) => result,
        (None, Some(error)) => anyhow::bail!("{error}"),
        (None, None) => anyhow::bail!("Simulation finished without a result"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print_results(result, denominator);
    }

    if let Some(path) = save_visualization {
        match &result.visualization {
            Some(encoded) => {
                let bytes = decode_visualization(encoded)?;
                std::fs::write(path, bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                if !json {
                    println!(
                        "\n{} Visualization saved to {}",
                        style("✓").green().bold(),
                        style(path.display()).cyan()
                    );
                }
            }
            None => eprintln!(
                "{} The service did not return a visualization",
                style("Warning:").yellow().bold()
            ),
        }
    }

    Ok(())
}

/// Decode a base64 image, with or without a `data:...;base64,` prefix.
fn decode_visualization(encoded: &str) -> Result<Vec<u8>> {
    let payload = match encoded.split_once(";base64,") {
        Some((_, data)) => data,
        None => encoded,
    };
    BASE64
        .decode(payload.trim())
        .context("Visualization is not valid base64")
}
