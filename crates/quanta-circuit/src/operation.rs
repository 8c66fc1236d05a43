//! Gate operations: a gate kind applied to concrete qubit indices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ValidationError, ValidationResult};
use crate::gate::GateKind;
use crate::qubit::QubitIndex;

/// A gate placed on the circuit.
///
/// Serializes to the shape the simulation service expects:
/// `{"name": "h", "targets": [0]}` or
/// `{"name": "cx", "controls": [0], "targets": [1]}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateOperation {
    /// Which gate.
    pub name: GateKind,
    /// Control qubits (empty for single-target gates).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<QubitIndex>,
    /// Target qubits.
    pub targets: Vec<QubitIndex>,
}

impl GateOperation {
    /// Create a single-target operation.
    pub fn single(kind: GateKind, target: QubitIndex) -> Self {
        Self {
            name: kind,
            controls: vec![],
            targets: vec![target],
        }
    }

    /// Create a controlled-NOT.
    ///
    /// Returns an error if `control == target`.
    pub fn cx(control: QubitIndex, target: QubitIndex) -> ValidationResult<Self> {
        if control == target {
            return Err(ValidationError::ControlEqualsTarget(control));
        }
        Ok(Self {
            name: GateKind::CX,
            controls: vec![control],
            targets: vec![target],
        })
    }

    /// All qubits this operation touches, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitIndex> + '_ {
        self.controls.iter().chain(self.targets.iter()).copied()
    }

    /// Check that the operand lists fit the gate kind and every index
    /// addresses a qubit of a `qubit_count`-qubit circuit.
    pub fn validate(&self, qubit_count: u32) -> ValidationResult<()> {
        let malformed = |reason: &str| ValidationError::MalformedOperands {
            gate: self.name.name().to_string(),
            reason: reason.to_string(),
        };

        if self.targets.len() != 1 {
            return Err(malformed("expected exactly one target"));
        }
        match (self.name.is_controlled(), self.controls.len()) {
            (true, 1) => {
                if self.controls[0] == self.targets[0] {
                    return Err(ValidationError::ControlEqualsTarget(self.targets[0]));
                }
            }
            (true, _) => return Err(malformed("expected exactly one control")),
            (false, 0) => {}
            (false, _) => return Err(malformed("single-qubit gate cannot have controls")),
        }

        for qubit in self.qubits() {
            qubit.check(qubit_count)?;
        }
        Ok(())
    }
}

impl fmt::Display for GateOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |qs: &[QubitIndex]| {
            qs.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        if self.controls.is_empty() {
            write!(f, "{} gate on {}", self.name.label(), join(&self.targets))
        } else {
            write!(
                f,
                "{} gate on control: {}, target: {}",
                self.name.label(),
                join(&self.controls),
                join(&self.targets)
            )
        }
    }
}

/// Parses the compact form used on command lines: `h:0`, `x:2`, `cx:0:1`.
///
/// A CNOT without an explicit target (`cx:0`) is rejected; the target is
/// only implied when placing gates through the model.
impl FromStr for GateOperation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let kind: GateKind = parts.next().unwrap_or_default().parse()?;

        let malformed = |reason: &str| ValidationError::MalformedOperands {
            gate: kind.name().to_string(),
            reason: reason.to_string(),
        };
        let mut operands = parts.map(|p| {
            p.trim()
                .parse::<u32>()
                .map(QubitIndex)
                .map_err(|_| malformed(&format!("'{p}' is not a qubit index")))
        });

        let first = operands
            .next()
            .ok_or_else(|| malformed("missing qubit index"))??;
        let op = if kind.is_controlled() {
            let target = operands
                .next()
                .ok_or_else(|| malformed("expected control and target, e.g. cx:0:1"))??;
            GateOperation::cx(first, target)?
        } else {
            GateOperation::single(kind, first)
        };

        if operands.next().is_some() {
            return Err(malformed("too many qubit indices"));
        }
        Ok(op)
    }
}
