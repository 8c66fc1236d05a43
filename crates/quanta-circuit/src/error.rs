//! Error types for the circuit model.

use thiserror::Error;

use crate::qubit::QubitIndex;

/// Errors detected locally, before anything is sent to the simulation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// Simulation requested for a circuit without gates.
    #[error("Please add at least one gate to the circuit")]
    EmptyCircuit,

    /// Qubit count outside the supported range.
    #[error("Qubit count {got} is out of range (expected {min}..={max})")]
    QubitCountOutOfRange {
        /// Requested count.
        got: u32,
        /// Smallest allowed count.
        min: u32,
        /// Largest allowed count.
        max: u32,
    },

    /// Gate references a qubit that does not exist in the circuit.
    #[error("Qubit {qubit} is out of range for a {qubit_count}-qubit circuit")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitIndex,
        /// Current number of qubits.
        qubit_count: u32,
    },

    /// Removal position past the end of the circuit.
    #[error("No gate at position {position} (circuit has {len} gates)")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Number of gates in the circuit.
        len: usize,
    },

    /// Controlled gate whose control and target coincide.
    #[error("Control and target must differ (both are {0})")]
    ControlEqualsTarget(QubitIndex),

    /// Gate operation whose operand lists do not fit its kind.
    #[error("Gate '{gate}' has malformed operands: {reason}")]
    MalformedOperands {
        /// Wire name of the gate.
        gate: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Gate name that is not part of the supported set.
    #[error("Unknown gate '{0}' (expected one of h, x, y, z, cx)")]
    UnknownGate(String),
}

/// Result type for circuit-model operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
