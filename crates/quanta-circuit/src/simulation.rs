//! Simulation request and result types exchanged with the service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ValidationError, ValidationResult};
use crate::operation::GateOperation;
use crate::qubit::check_qubit_count;

/// Payload posted to `/simulate`.
///
/// The order of `gates` is the order in which they are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Number of qubits in the circuit.
    pub qubits: u32,
    /// Gate operations in application order.
    pub gates: Vec<GateOperation>,
}

impl SimulationRequest {
    /// Build a request, checking the qubit count and every operation.
    pub fn new(qubits: u32, gates: Vec<GateOperation>) -> ValidationResult<Self> {
        check_qubit_count(qubits)?;
        if gates.is_empty() {
            return Err(ValidationError::EmptyCircuit);
        }
        for gate in &gates {
            gate.validate(qubits)?;
        }
        Ok(Self { qubits, gates })
    }
}

/// Measurement counts returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Outcome bit-string → number of trials that produced it.
    pub counts: BTreeMap<String, u64>,
    /// Optional base64-encoded PNG of the histogram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization: Option<String>,
}

impl SimulationResult {
    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().copied().fold(0u64, u64::saturating_add)
    }

    /// Check that every outcome is a bit-string of `qubits` characters.
    pub fn check_shape(&self, qubits: u32) -> Result<(), String> {
        for key in self.counts.keys() {
            if key.len() != qubits as usize {
                return Err(format!(
                    "outcome '{key}' has {} bits, expected {qubits}",
                    key.len()
                ));
            }
            if !key.chars().all(|c| c == '0' || c == '1') {
                return Err(format!("outcome '{key}' is not a bit-string"));
            }
        }
        Ok(())
    }

    /// Outcomes with their share of the total, most frequent first.
    pub fn rows(&self, denominator: Denominator) -> Vec<OutcomeRow> {
        let total = match denominator {
            Denominator::Observed => self.total(),
            Denominator::Shots(shots) => shots,
        };

        let mut rows: Vec<OutcomeRow> = self
            .counts
            .iter()
            .map(|(bitstring, &count)| OutcomeRow {
                bitstring: bitstring.clone(),
                count,
                percent: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                },
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.bitstring.cmp(&b.bitstring)));
        rows
    }
}

/// What percentages are taken relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Denominator {
    /// Sum of the returned counts.
    #[default]
    Observed,
    /// A fixed number of shots known to the caller.
    Shots(u64),
}

/// One line of the measurement table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeRow {
    /// Measured bit-string.
    pub bitstring: String,
    /// Number of trials.
    pub count: u64,
    /// Share of the denominator, in percent.
    pub percent: f64,
}
