//! Integration tests for the Quanta client against an in-process mock service.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use quanta_circuit::{CompletionOutcome, GateKind, QubitIndex};
use quanta_client::{
    CircuitSession, ClientConfig, ClientError, QuantaClient, QuizLevel, SimulationService,
};

// ============================================================================
// Test helpers
// ============================================================================

/// What the mock service saw and what it should answer.
#[derive(Default)]
struct MockState {
    calls: AtomicUsize,
    bodies: Mutex<Vec<Value>>,
    queries: Mutex<Vec<HashMap<String, String>>>,
    /// Responses handed out in order; the last one repeats.
    script: Mutex<Vec<(StatusCode, String)>>,
}

impl MockState {
    fn scripted(responses: Vec<(StatusCode, Value)>) -> Arc<Self> {
        let script = responses
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect();
        Arc::new(Self {
            script: Mutex::new(script),
            ..Self::default()
        })
    }

    fn raw(status: StatusCode, body: &str) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(vec![(status, body.to_string())]),
            ..Self::default()
        })
    }

    fn next_response(&self) -> Response {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut script = self.script.lock().unwrap();
        let (status, body) = if script.len() > 1 {
            script.remove(0)
        } else {
            script[0].clone()
        };
        (status, [("content-type", "application/json")], body).into_response()
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn record_post(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.bodies.lock().unwrap().push(body);
    state.next_response()
}

async fn record_get(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.queries.lock().unwrap().push(query);
    state.next_response()
}

/// Serve the mock on an ephemeral port and return its `/api` root.
async fn spawn_service(state: Arc<MockState>) -> String {
    let router = Router::new()
        .route("/api/simulate", post(record_post))
        .route("/api/health", get(record_get))
        .route("/api/glossary", get(record_get))
        .route("/api/quiz", get(record_get))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn client(base_url: &str) -> QuantaClient {
    QuantaClient::new(&ClientConfig::new(base_url)).expect("client")
}

async fn bell_session(base_url: &str) -> CircuitSession {
    let service: Arc<dyn SimulationService> = Arc::new(client(base_url));
    let session = CircuitSession::new(service);
    session.add_gate(QubitIndex(0)).await.unwrap();
    session.select_gate(GateKind::CX).await.unwrap();
    session.add_gate(QubitIndex(0)).await.unwrap();
    session
}

fn bell_response() -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({"success": true, "data": {"counts": {"00": 512, "11": 512}}}),
    )
}

// ============================================================================
// Simulation
// ============================================================================

#[tokio::test]
async fn test_bell_simulation_round_trip() {
    let state = MockState::scripted(vec![bell_response()]);
    let base_url = spawn_service(state.clone()).await;
    let session = bell_session(&base_url).await;

    let outcome = session.simulate().await.unwrap();
    assert_eq!(outcome, CompletionOutcome::Applied);

    let bodies = state.bodies.lock().unwrap().clone();
    assert_eq!(
        bodies,
        vec![json!({
            "qubits": 2,
            "gates": [
                {"name": "h", "targets": [0]},
                {"name": "cx", "controls": [0], "targets": [1]}
            ]
        })]
    );

    let result = session.last_result().await.expect("result stored");
    assert_eq!(result.counts.get("00"), Some(&512));
    assert_eq!(result.counts.get("11"), Some(&512));
    assert!(session.last_error().await.is_none());
    assert!(!session.snapshot().await.is_simulating());
}

#[tokio::test]
async fn test_server_error_replaces_previous_result() {
    let state = MockState::scripted(vec![
        bell_response(),
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "Error simulating circuit: backend unavailable"}),
        ),
    ]);
    let base_url = spawn_service(state.clone()).await;
    let session = bell_session(&base_url).await;

    session.simulate().await.unwrap();
    assert!(session.last_result().await.is_some());

    let outcome = session.simulate().await.unwrap();
    assert_eq!(outcome, CompletionOutcome::Applied);
    assert!(session.last_result().await.is_none());

    let message = session.last_error().await.expect("error stored");
    assert!(message.contains("backend unavailable"), "{message}");
    assert_eq!(state.calls(), 2);
}

#[tokio::test]
async fn test_empty_circuit_issues_no_request() {
    let state = MockState::scripted(vec![bell_response()]);
    let base_url = spawn_service(state.clone()).await;
    let service: Arc<dyn SimulationService> = Arc::new(client(&base_url));
    let session = CircuitSession::new(service);

    let err = session.simulate().await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(
        session.last_error().await.as_deref(),
        Some("Please add at least one gate to the circuit")
    );
    assert_eq!(state.calls(), 0);
}

#[tokio::test]
async fn test_counts_with_wrong_width_are_malformed() {
    let state = MockState::scripted(vec![(
        StatusCode::OK,
        json!({"success": true, "data": {"counts": {"0": 1024}}}),
    )]);
    let base_url = spawn_service(state).await;
    let session = bell_session(&base_url).await;
    let request = session.snapshot().await.to_request().unwrap();

    let err = client(&base_url).simulate(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Malformed(_)), "{err}");
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let state = MockState::raw(StatusCode::OK, "<html>proxy page</html>");
    let base_url = spawn_service(state).await;
    let session = bell_session(&base_url).await;
    let request = session.snapshot().await.to_request().unwrap();

    let err = client(&base_url).simulate(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Malformed(_)), "{err}");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let state = MockState::raw(StatusCode::BAD_GATEWAY, "Bad Gateway");
    let base_url = spawn_service(state).await;

    let err = client(&base_url).health().await.unwrap_err();
    match err {
        ClientError::Service { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base_url = format!("http://{addr}/api");
    let session = bell_session(&base_url).await;
    let request = session.snapshot().await.to_request().unwrap();

    let err = client(&base_url).simulate(&request).await.unwrap_err();
    assert!(err.is_transport(), "{err}");

    // Through the session the failure lands on the model instead.
    session.simulate().await.unwrap();
    assert!(session.last_error().await.is_some());
    assert!(session.last_result().await.is_none());
}

// ============================================================================
// Health, glossary and quiz
// ============================================================================

#[tokio::test]
async fn test_health() {
    let state = MockState::scripted(vec![(
        StatusCode::OK,
        json!({"status": "ok", "message": "Quantum Computing API is running"}),
    )]);
    let base_url = spawn_service(state).await;

    let health = client(&base_url).health().await.unwrap();
    assert!(health.is_ok());
    assert_eq!(
        health.message.as_deref(),
        Some("Quantum Computing API is running")
    );
}

#[tokio::test]
async fn test_glossary_wrapped_list() {
    let state = MockState::scripted(vec![(
        StatusCode::OK,
        json!({"success": true, "data": [
            {"term": "Qubit", "definition": "Can be 0, 1, or both (superposition)."},
            {"term": "Entanglement", "definition": "Linked qubits."}
        ]}),
    )]);
    let base_url = spawn_service(state.clone()).await;

    let listing = client(&base_url).glossary(None).await.unwrap();
    assert_eq!(listing.terms.len(), 2);
    assert!(listing.pagination.is_none());
    assert!(state.queries.lock().unwrap()[0].is_empty());
}

#[tokio::test]
async fn test_glossary_paged() {
    let state = MockState::scripted(vec![(
        StatusCode::OK,
        json!({
            "data": [{"term": "Qubit", "definition": "d", "examples": ["|0⟩ + |1⟩"]}],
            "pagination": {"total_pages": 3, "total_items": 21}
        }),
    )]);
    let base_url = spawn_service(state.clone()).await;

    let listing = client(&base_url).glossary(Some((2, 10))).await.unwrap();
    assert_eq!(listing.terms[0].examples.len(), 1);
    assert_eq!(listing.pagination.map(|p| p.total_pages), Some(3));

    let query = state.queries.lock().unwrap()[0].clone();
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
    assert_eq!(query.get("per_page").map(String::as_str), Some("10"));
}

#[tokio::test]
async fn test_quiz_sends_level() {
    let state = MockState::scripted(vec![(
        StatusCode::OK,
        json!({"success": true, "data": [{
            "level": "advanced",
            "question": "What does a CNOT do?",
            "options": ["Flips target if control is 1", "Measures", "Resets"],
            "correctAnswer": 0
        }]}),
    )]);
    let base_url = spawn_service(state.clone()).await;

    let questions = client(&base_url).quiz(QuizLevel::Advanced).await.unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].correct_answer, 0);

    let query = state.queries.lock().unwrap()[0].clone();
    assert_eq!(query.get("level").map(String::as_str), Some("advanced"));
}

#[tokio::test]
async fn test_unsuccessful_envelope() {
    let state = MockState::scripted(vec![(
        StatusCode::OK,
        json!({"success": false, "error": "Database connection failed"}),
    )]);
    let base_url = spawn_service(state).await;

    let err = client(&base_url).quiz(QuizLevel::All).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Malformed response: Database connection failed"
    );
}
