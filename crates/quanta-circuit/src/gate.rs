//! Gate kinds offered by the circuit builder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The gates a student can place on the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    /// Hadamard gate.
    #[default]
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Controlled-NOT gate.
    #[serde(alias = "cnot")]
    CX,
}

impl GateKind {
    /// Every gate in palette order.
    pub const ALL: [GateKind; 5] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::CX,
    ];

    /// Name used on the wire.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "h",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::CX => "cx",
        }
    }

    /// Name shown to the student.
    pub fn label(self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::CX => "CNOT",
        }
    }

    /// One-line explanation of what the gate does.
    pub fn description(self) -> &'static str {
        match self {
            GateKind::H => "Hadamard gate - Creates superposition",
            GateKind::X => "Pauli-X gate - Bit flip (NOT gate)",
            GateKind::Y => "Pauli-Y gate - Bit and phase flip",
            GateKind::Z => "Pauli-Z gate - Phase flip",
            GateKind::CX => "Controlled-NOT gate - Entangles qubits",
        }
    }

    /// Whether the gate takes a control qubit.
    #[inline]
    pub fn is_controlled(self) -> bool {
        matches!(self, GateKind::CX)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GateKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" => Ok(GateKind::H),
            "x" => Ok(GateKind::X),
            "y" => Ok(GateKind::Y),
            "z" => Ok(GateKind::Z),
            "cx" | "cnot" => Ok(GateKind::CX),
            _ => Err(ValidationError::UnknownGate(s.to_string())),
        }
    }
}
