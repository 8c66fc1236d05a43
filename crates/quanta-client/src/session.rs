//! A circuit builder bound to a simulation service.
//!
//! [`CircuitSession`] is a cheap, cloneable handle. The model lock is only
//! held for state transitions, never across the network call, so gates can
//! be added or removed while a simulation is running. Overlapping
//! simulations follow the model's last-issued-wins rule, and
//! [`close`](CircuitSession::close) makes sure nothing lands after teardown.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use quanta_circuit::{
    CircuitModel, CompletionOutcome, GateKind, GateOperation, QubitIndex, SimulationResult,
};

use crate::error::{ClientError, ClientResult};
use crate::service::SimulationService;

/// Circuit model plus the service that simulates it.
#[derive(Clone)]
pub struct CircuitSession {
    model: Arc<Mutex<CircuitModel>>,
    service: Arc<dyn SimulationService>,
    closed: Arc<AtomicBool>,
}

impl CircuitSession {
    /// Open a session on a fresh default model.
    pub fn new(service: Arc<dyn SimulationService>) -> Self {
        Self::with_model(CircuitModel::new(), service)
    }

    /// Open a session on an existing model.
    pub fn with_model(model: CircuitModel, service: Arc<dyn SimulationService>) -> Self {
        Self {
            model: Arc::new(Mutex::new(model)),
            service,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Copy of the current model state.
    pub async fn snapshot(&self) -> CircuitModel {
        self.model.lock().await.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Lock the model, failing if the session has been closed.
    ///
    /// The flag is read under the guard: a call queued on the lock when
    /// `close()` runs observes the closed state once it gets through.
    async fn lock_open(&self) -> ClientResult<MutexGuard<'_, CircuitModel>> {
        let model = self.model.lock().await;
        if self.is_closed() {
            return Err(ClientError::Closed);
        }
        Ok(model)
    }

    pub async fn set_qubit_count(&self, n: u32) -> ClientResult<()> {
        self.lock_open().await?.set_qubit_count(n)?;
        Ok(())
    }

    pub async fn select_gate(&self, kind: GateKind) -> ClientResult<()> {
        self.lock_open().await?.select_gate(kind);
        Ok(())
    }

    /// Add the selected gate on `qubit` and return what was appended.
    pub async fn add_gate(&self, qubit: QubitIndex) -> ClientResult<GateOperation> {
        let mut model = self.lock_open().await?;
        Ok(model.add_gate(qubit)?.clone())
    }

    /// Append an explicit operation.
    pub async fn push_operation(&self, operation: GateOperation) -> ClientResult<GateOperation> {
        let mut model = self.lock_open().await?;
        Ok(model.push_operation(operation)?.clone())
    }

    pub async fn remove_gate(&self, position: usize) -> ClientResult<GateOperation> {
        Ok(self.lock_open().await?.remove_gate(position)?)
    }

    pub async fn reset(&self) -> ClientResult<()> {
        self.lock_open().await?.reset();
        Ok(())
    }

    /// Simulate the current circuit.
    ///
    /// Returns `Err` only when nothing could be sent: an empty circuit
    /// (the validation message is also stored on the model) or a closed
    /// session. A service failure is stored on the model as the last error
    /// and reported as [`CompletionOutcome::Applied`]; the caller reads it
    /// back from [`snapshot`](Self::snapshot). [`CompletionOutcome::Stale`]
    /// means a newer simulation, reset, qubit change or teardown won.
    pub async fn simulate(&self) -> ClientResult<CompletionOutcome> {
        let (ticket, request) = self.lock_open().await?.begin_simulation()?;

        let outcome = self.service.simulate(&request).await;
        if let Err(e) = &outcome {
            warn!(error = %e, "simulation request failed");
        }

        let mut model = self.model.lock().await;
        if self.is_closed() {
            debug!(generation = ticket.generation(), "session closed, discarding response");
            return Ok(CompletionOutcome::Stale);
        }
        Ok(model.complete_simulation(ticket, outcome))
    }

    /// Last successful result, if any.
    pub async fn last_result(&self) -> Option<SimulationResult> {
        self.model.lock().await.last_result().cloned()
    }

    /// Last error message, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.model.lock().await.last_error().map(str::to_string)
    }

    /// Tear the session down. In-flight responses are discarded and every
    /// later mutating call fails with [`ClientError::Closed`], including
    /// calls already waiting on the model lock.
    pub async fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.model.lock().await.invalidate_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quanta_circuit::{SimulationRequest, ValidationError};
    use std::collections::BTreeMap;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    fn bell_result() -> SimulationResult {
        SimulationResult {
            counts: BTreeMap::from([("00".to_string(), 512), ("11".to_string(), 512)]),
            visualization: None,
        }
    }

    /// Records requests and answers with a canned outcome.
    struct RecordingService {
        requests: std::sync::Mutex<Vec<SimulationRequest>>,
        fail_with: Option<u16>,
    }

    impl RecordingService {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                requests: std::sync::Mutex::new(vec![]),
                fail_with: None,
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                requests: std::sync::Mutex::new(vec![]),
                fail_with: Some(status),
            })
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SimulationService for RecordingService {
        async fn simulate(&self, request: &SimulationRequest) -> ClientResult<SimulationResult> {
            self.requests.lock().unwrap().push(request.clone());
            match self.fail_with {
                Some(status) => Err(ClientError::Service {
                    status,
                    message: "Internal Server Error".into(),
                }),
                None => Ok(bell_result()),
            }
        }
    }

    /// Holds the first call until released; later calls answer at once.
    struct GatedService {
        gate: Notify,
        calls: AtomicUsize,
    }

    impl GatedService {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                gate: Notify::new(),
                calls: AtomicUsize::new(0),
            })
        }

        async fn wait_for_first_call(&self) {
            while self.calls.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
        }
    }

    #[async_trait]
    impl SimulationService for GatedService {
        async fn simulate(&self, _request: &SimulationRequest) -> ClientResult<SimulationResult> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.gate.notified().await;
            }
            Ok(bell_result())
        }
    }

    async fn bell_session(service: Arc<dyn SimulationService>) -> CircuitSession {
        let session = CircuitSession::new(service);
        session.add_gate(QubitIndex(0)).await.unwrap();
        session.select_gate(GateKind::CX).await.unwrap();
        session.add_gate(QubitIndex(0)).await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_bell_round_trip() {
        let service = RecordingService::ok();
        let session = bell_session(service.clone()).await;

        let outcome = session.simulate().await.unwrap();
        assert_eq!(outcome, CompletionOutcome::Applied);
        assert_eq!(session.last_result().await, Some(bell_result()));
        assert!(session.last_error().await.is_none());

        let sent = service.requests.lock().unwrap()[0].clone();
        assert_eq!(sent.qubits, 2);
        assert_eq!(sent.gates.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_circuit_sends_nothing() {
        let service = RecordingService::ok();
        let session = CircuitSession::new(service.clone());

        let err = session.simulate().await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::EmptyCircuit)
        ));
        assert_eq!(service.calls(), 0);
        assert!(session.last_error().await.is_some());
    }

    #[tokio::test]
    async fn test_service_failure_is_recorded() {
        let session = bell_session(RecordingService::failing(500)).await;

        let outcome = session.simulate().await.unwrap();
        assert_eq!(outcome, CompletionOutcome::Applied);
        assert!(session.last_result().await.is_none());
        let message = session.last_error().await.unwrap();
        assert!(message.contains("500"), "{message}");
    }

    #[tokio::test]
    async fn test_edits_allowed_while_in_flight_and_newer_call_wins() {
        let service = GatedService::new();
        let session = bell_session(service.clone()).await;

        let first = tokio::spawn({
            let session = session.clone();
            async move { session.simulate().await }
        });
        service.wait_for_first_call().await;

        // The model is not locked while the first request is pending.
        session.select_gate(GateKind::X).await.unwrap();
        session.add_gate(QubitIndex(1)).await.unwrap();
        assert!(session.snapshot().await.is_simulating());

        let second = session.simulate().await.unwrap();
        assert_eq!(second, CompletionOutcome::Applied);

        service.gate.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first, CompletionOutcome::Stale);
        assert_eq!(session.snapshot().await.len(), 3);
    }

    #[tokio::test]
    async fn test_close_discards_in_flight_response() {
        let service = GatedService::new();
        let session = bell_session(service.clone()).await;

        let pending = tokio::spawn({
            let session = session.clone();
            async move { session.simulate().await }
        });
        service.wait_for_first_call().await;

        session.close().await;
        service.gate.notify_one();

        assert_eq!(pending.await.unwrap().unwrap(), CompletionOutcome::Stale);
        assert!(session.last_result().await.is_none());
        assert!(matches!(
            session.add_gate(QubitIndex(0)).await,
            Err(ClientError::Closed)
        ));
        assert!(matches!(session.simulate().await, Err(ClientError::Closed)));
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_close_rejects_calls_queued_on_the_lock() {
        let service = RecordingService::ok();
        let session = bell_session(service.clone()).await;

        let guard = session.model.lock().await;
        let add = tokio::spawn({
            let session = session.clone();
            async move { session.add_gate(QubitIndex(0)).await }
        });
        let run = tokio::spawn({
            let session = session.clone();
            async move { session.simulate().await }
        });
        settle().await;
        let close = tokio::spawn({
            let session = session.clone();
            async move { session.close().await }
        });
        settle().await;
        drop(guard);

        close.await.unwrap();
        assert!(matches!(add.await.unwrap(), Err(ClientError::Closed)));
        assert!(matches!(run.await.unwrap(), Err(ClientError::Closed)));
        assert_eq!(session.snapshot().await.len(), 2);
        assert_eq!(service.calls(), 0);
    }
}
