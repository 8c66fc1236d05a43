//! Quanta service client
//!
//! Everything needed to talk to the Quanta learning service:
//!
//! - [`QuantaClient`]: REST calls for health, glossary, quiz and simulation
//! - [`CircuitSession`]: a [`CircuitModel`](quanta_circuit::CircuitModel)
//!   wired to a [`SimulationService`], safe to edit while a request is out
//! - [`QuizSession`] and the glossary helpers: the state behind the quiz
//!   and glossary views
//! - [`Config`]: YAML file, `.env` and `QUANTA_*` environment settings
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use quanta_circuit::{GateKind, QubitIndex};
//! use quanta_client::{CircuitSession, ClientConfig, QuantaClient};
//!
//! # async fn demo() -> quanta_client::ClientResult<()> {
//! let client = QuantaClient::new(&ClientConfig::default())?;
//! let session = CircuitSession::new(Arc::new(client));
//!
//! session.add_gate(QubitIndex(0)).await?;
//! session.select_gate(GateKind::CX).await?;
//! session.add_gate(QubitIndex(0)).await?;
//! session.simulate().await?;
//!
//! if let Some(result) = session.last_result().await {
//!     println!("{:?}", result.counts);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod glossary;
pub mod quiz;
pub mod service;
pub mod session;

pub use api::{HealthStatus, QuantaClient};
pub use config::{ClientConfig, Config, ConfigError, DEFAULT_BASE_URL, DisplayConfig};
pub use error::{ClientError, ClientResult};
pub use glossary::{GlossaryListing, GlossaryTerm, Page, Pagination};
pub use quiz::{AnswerFeedback, QuizLevel, QuizQuestion, QuizSession};
pub use service::SimulationService;
pub use session::CircuitSession;
