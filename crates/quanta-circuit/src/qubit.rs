//! Qubit indices and the supported qubit-count range.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValidationError, ValidationResult};

/// Smallest circuit the builder allows.
pub const MIN_QUBITS: u32 = 1;

/// Largest circuit the builder allows.
pub const MAX_QUBITS: u32 = 5;

/// Index of a qubit line in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitIndex(pub u32);

impl QubitIndex {
    /// Check that this index addresses a qubit of a `qubit_count`-qubit circuit.
    pub fn check(self, qubit_count: u32) -> ValidationResult<Self> {
        if self.0 < qubit_count {
            Ok(self)
        } else {
            Err(ValidationError::QubitOutOfRange {
                qubit: self,
                qubit_count,
            })
        }
    }

    /// The index following this one, wrapping around at `qubit_count`.
    pub fn next_wrapping(self, qubit_count: u32) -> Self {
        QubitIndex((self.0 + 1) % qubit_count)
    }
}

impl fmt::Display for QubitIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitIndex {
    fn from(index: u32) -> Self {
        QubitIndex(index)
    }
}

/// Validate a requested qubit count against [`MIN_QUBITS`]..=[`MAX_QUBITS`].
pub fn check_qubit_count(n: u32) -> ValidationResult<u32> {
    if (MIN_QUBITS..=MAX_QUBITS).contains(&n) {
        Ok(n)
    } else {
        Err(ValidationError::QubitCountOutOfRange {
            got: n,
            min: MIN_QUBITS,
            max: MAX_QUBITS,
        })
    }
}
