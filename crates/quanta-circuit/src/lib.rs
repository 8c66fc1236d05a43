//! Quanta circuit-builder model
//!
//! This crate holds the state behind the Quanta circuit simulator: a small
//! number of qubit lines, an ordered list of gate operations placed on them,
//! and the outcome of the last simulation. It also defines the JSON shapes
//! exchanged with the simulation service.
//!
//! Nothing here talks to the network. [`CircuitModel::begin_simulation`]
//! produces a [`SimulationRequest`] and a [`SimulationTicket`]; whoever sends
//! the request hands the outcome back through
//! [`CircuitModel::complete_simulation`].
//!
//! # Example: Building a Bell pair
//!
//! ```rust
//! use quanta_circuit::{CircuitModel, GateKind, QubitIndex};
//!
//! let mut model = CircuitModel::with_qubits(2).unwrap();
//! model.add_gate(QubitIndex(0)).unwrap();          // H on q0
//! model.select_gate(GateKind::CX);
//! model.add_gate(QubitIndex(0)).unwrap();          // CNOT q0 → q1
//!
//! let (_ticket, request) = model.begin_simulation().unwrap();
//! assert_eq!(
//!     serde_json::to_string(&request).unwrap(),
//!     r#"{"qubits":2,"gates":[{"name":"h","targets":[0]},{"name":"cx","controls":[0],"targets":[1]}]}"#
//! );
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Wire name | Qubits |
//! |------|-----------|--------|
//! | `H` | `h` | 1 |
//! | `X`, `Y`, `Z` | `x`, `y`, `z` | 1 |
//! | `CNOT` | `cx` | 2 |

pub mod diagram;
pub mod error;
pub mod gate;
pub mod model;
pub mod operation;
pub mod qubit;
pub mod simulation;

pub use error::{ValidationError, ValidationResult};
pub use gate::GateKind;
pub use model::{CircuitModel, CompletionOutcome, DEFAULT_QUBITS, SimulationTicket};
pub use operation::GateOperation;
pub use qubit::{MAX_QUBITS, MIN_QUBITS, QubitIndex};
pub use simulation::{Denominator, OutcomeRow, SimulationRequest, SimulationResult};
