//! The circuit-builder state machine.
//!
//! ```text
//!   set_qubit_count / select_gate / add_gate / remove_gate / reset
//!                 │
//!                 ▼
//!   begin_simulation() ──→ (request in flight) ──→ complete_simulation()
//!        │                        │
//!        └── EmptyCircuit         └── reset / set_qubit_count / invalidate
//!                                     make the ticket stale
//! ```
//!
//! **Invariants:**
//! - Every operation references qubits `< qubit_count`. Changing the qubit
//!   count clears the circuit, so this holds by construction.
//! - Operations are kept in insertion order; nothing is reordered or merged.
//! - Only the most recently issued simulation ticket may store a result.

use std::fmt::Display;

use tracing::{debug, info};

use crate::error::{ValidationError, ValidationResult};
use crate::gate::GateKind;
use crate::operation::GateOperation;
use crate::qubit::{QubitIndex, check_qubit_count};
use crate::simulation::{SimulationRequest, SimulationResult};

/// Qubit count of a freshly opened builder.
pub const DEFAULT_QUBITS: u32 = 2;

/// Proof that a simulation was started; hand it back on completion.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a ticket must be passed to complete_simulation"]
pub struct SimulationTicket {
    generation: u64,
}

impl SimulationTicket {
    /// Generation number this ticket was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The outcome was stored in the model.
    Applied,
    /// A newer simulation, a reset or a teardown superseded this one.
    Stale,
}

/// Circuit under construction plus the outcome of the last simulation.
#[derive(Debug, Clone)]
pub struct CircuitModel {
    qubit_count: u32,
    operations: Vec<GateOperation>,
    selected_gate: GateKind,
    last_result: Option<SimulationResult>,
    last_error: Option<String>,
    generation: u64,
    pending: Option<u64>,
}

impl CircuitModel {
    /// Create an empty builder with [`DEFAULT_QUBITS`] qubits and `H` selected.
    pub fn new() -> Self {
        Self {
            qubit_count: DEFAULT_QUBITS,
            operations: vec![],
            selected_gate: GateKind::default(),
            last_result: None,
            last_error: None,
            generation: 0,
            pending: None,
        }
    }

    /// Create an empty builder with `qubits` qubits.
    pub fn with_qubits(qubits: u32) -> ValidationResult<Self> {
        let mut model = Self::new();
        model.set_qubit_count(qubits)?;
        Ok(model)
    }

    /// Number of qubit lines.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Gate operations in application order.
    pub fn operations(&self) -> &[GateOperation] {
        &self.operations
    }

    /// Number of gate operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Gate kind that the next [`add_gate`](Self::add_gate) places.
    pub fn selected_gate(&self) -> GateKind {
        self.selected_gate
    }

    /// Result of the last successful simulation.
    pub fn last_result(&self) -> Option<&SimulationResult> {
        self.last_result.as_ref()
    }

    /// Message describing the last failure.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether a simulation ticket is outstanding.
    pub fn is_simulating(&self) -> bool {
        self.pending.is_some()
    }

    /// Change the number of qubits.
    ///
    /// Out-of-range values are rejected, not clamped. On success the circuit
    /// and the last result are cleared and any in-flight simulation becomes
    /// stale.
    pub fn set_qubit_count(&mut self, n: u32) -> ValidationResult<()> {
        let n = check_qubit_count(n)?;
        info!(from = self.qubit_count, to = n, "qubit count changed, clearing circuit");
        self.qubit_count = n;
        self.operations.clear();
        self.last_result = None;
        self.invalidate_pending();
        Ok(())
    }

    /// Choose the gate kind for subsequent additions.
    pub fn select_gate(&mut self, kind: GateKind) {
        self.selected_gate = kind;
    }

    /// Append the selected gate on `qubit`.
    ///
    /// A CNOT takes `qubit` as control and the next qubit (wrapping) as
    /// target. On a single-qubit circuit that would be the control itself,
    /// so the call is rejected.
    pub fn add_gate(&mut self, qubit: QubitIndex) -> ValidationResult<&GateOperation> {
        let qubit = qubit.check(self.qubit_count)?;
        let operation = if self.selected_gate.is_controlled() {
            GateOperation::cx(qubit, qubit.next_wrapping(self.qubit_count))?
        } else {
            GateOperation::single(self.selected_gate, qubit)
        };
        Ok(self.append(operation))
    }

    /// Append an explicitly constructed operation after validating it
    /// against the current qubit count.
    pub fn push_operation(&mut self, operation: GateOperation) -> ValidationResult<&GateOperation> {
        operation.validate(self.qubit_count)?;
        Ok(self.append(operation))
    }

    fn append(&mut self, operation: GateOperation) -> &GateOperation {
        debug!(position = self.operations.len(), gate = %operation, "gate added");
        self.operations.push(operation);
        &self.operations[self.operations.len() - 1]
    }

    /// Remove the operation at `position`; later operations shift down.
    pub fn remove_gate(&mut self, position: usize) -> ValidationResult<GateOperation> {
        if position >= self.operations.len() {
            return Err(ValidationError::PositionOutOfRange {
                position,
                len: self.operations.len(),
            });
        }
        let removed = self.operations.remove(position);
        debug!(position, gate = %removed, "gate removed");
        Ok(removed)
    }

    /// Clear the circuit, the last result and the last error.
    pub fn reset(&mut self) {
        self.operations.clear();
        self.last_result = None;
        self.last_error = None;
        self.invalidate_pending();
    }

    /// Build the request for the current circuit without starting anything.
    pub fn to_request(&self) -> ValidationResult<SimulationRequest> {
        SimulationRequest::new(self.qubit_count, self.operations.clone())
    }

    /// Start a simulation.
    ///
    /// An empty circuit records the validation message and returns
    /// [`ValidationError::EmptyCircuit`]; nothing should be sent. Otherwise
    /// the last error is cleared and a ticket is issued that supersedes any
    /// earlier one.
    pub fn begin_simulation(&mut self) -> ValidationResult<(SimulationTicket, SimulationRequest)> {
        let request = match self.to_request() {
            Ok(request) => request,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return Err(e);
            }
        };

        self.generation += 1;
        self.pending = Some(self.generation);
        self.last_error = None;
        debug!(generation = self.generation, gates = request.gates.len(), "simulation started");

        Ok((
            SimulationTicket {
                generation: self.generation,
            },
            request,
        ))
    }

    /// Store the outcome of the simulation identified by `ticket`.
    ///
    /// On success the result replaces the previous one and the error is
    /// cleared. On failure the error message is recorded and the previous
    /// result is cleared. Outcomes for superseded tickets are dropped.
    pub fn complete_simulation<E: Display>(
        &mut self,
        ticket: SimulationTicket,
        outcome: Result<SimulationResult, E>,
    ) -> CompletionOutcome {
        if self.pending != Some(ticket.generation) {
            debug!(generation = ticket.generation, "dropping stale simulation outcome");
            return CompletionOutcome::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(result) => {
                info!(outcomes = result.counts.len(), "simulation completed");
                self.last_result = Some(result);
                self.last_error = None;
            }
            Err(e) => {
                info!(error = %e, "simulation failed");
                self.last_result = None;
                self.last_error = Some(format!("Error simulating circuit: {e}"));
            }
        }
        CompletionOutcome::Applied
    }

    /// Make any outstanding ticket stale.
    pub fn invalidate_pending(&mut self) {
        self.pending = None;
    }
}

impl Default for CircuitModel {
    fn default() -> Self {
        Self::new()
    }
}
