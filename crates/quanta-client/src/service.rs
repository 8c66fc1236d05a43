//! The seam between the circuit session and whatever runs the simulation.

use async_trait::async_trait;

use quanta_circuit::{SimulationRequest, SimulationResult};

use crate::api::QuantaClient;
use crate::error::ClientResult;

/// Something that turns a simulation request into measurement counts.
///
/// [`QuantaClient`] is the production implementation; tests substitute
/// in-memory services.
#[async_trait]
pub trait SimulationService: Send + Sync {
    /// Run one simulation. Implementations must not retry on their own.
    async fn simulate(&self, request: &SimulationRequest) -> ClientResult<SimulationResult>;
}

#[async_trait]
impl SimulationService for QuantaClient {
    async fn simulate(&self, request: &SimulationRequest) -> ClientResult<SimulationResult> {
        QuantaClient::simulate(self, request).await
    }
}
