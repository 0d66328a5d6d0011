//! In-process stand-in for the remote expense store.
#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use api_types::expense::{ExpenseBody, ExpenseView};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use expense_tracker::{AppConfig, ExpenseClient, MutationSync, Session, SyncController};
use uuid::Uuid;

pub const TOKEN: &str = "secret-token";

#[derive(Debug, Default)]
pub struct MockState {
    pub expenses: Vec<ExpenseView>,
    /// Number of requests that reached the server.
    pub hits: usize,
    /// When set, every request is answered with this status and body.
    pub fail_with: Option<(StatusCode, String)>,
    /// Like `fail_with`, but only for `GET /api/expenses`.
    pub fail_lists_with: Option<(StatusCode, String)>,
}

#[derive(Clone, Default)]
pub struct MockServer {
    pub state: Arc<Mutex<MockState>>,
}

impl MockServer {
    pub fn seed(&self, expenses: Vec<ExpenseView>) {
        self.state.lock().unwrap().expenses = expenses;
    }

    pub fn hits(&self) -> usize {
        self.state.lock().unwrap().hits
    }

    pub fn fail_with(&self, status: StatusCode, body: &str) {
        self.state.lock().unwrap().fail_with = Some((status, body.to_string()));
    }

    pub fn fail_lists_with(&self, status: StatusCode, body: &str) {
        self.state.lock().unwrap().fail_lists_with = Some((status, body.to_string()));
    }

    pub fn heal(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_with = None;
        state.fail_lists_with = None;
    }

    pub fn expenses(&self) -> Vec<ExpenseView> {
        self.state.lock().unwrap().expenses.clone()
    }
}

pub fn view(id: &str, amount: f64, category: &str, description: &str, date: &str) -> ExpenseView {
    ExpenseView {
        id: id.to_string(),
        amount,
        category: category.to_string(),
        description: description.to_string(),
        date: date.to_string(),
    }
}

/// Starts the mock on an ephemeral port.
pub async fn spawn() -> (MockServer, SocketAddr) {
    let server = MockServer::default();
    let router = Router::new()
        .route("/api/expenses", get(list).post(create))
        .route("/api/expenses/{id}", axum::routing::put(update).delete(remove))
        .with_state(server.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (server, addr)
}

/// An address nothing listens on.
pub async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn config(addr: SocketAddr) -> AppConfig {
    AppConfig {
        base_url: format!("http://{addr}"),
        request_timeout_secs: 5,
        ..AppConfig::default()
    }
}

pub fn logged_in_session() -> Session {
    let session = Session::in_memory();
    session.set_token(TOKEN);
    session
}

pub fn client(addr: SocketAddr, session: Session) -> ExpenseClient {
    ExpenseClient::new(&config(addr), session).unwrap()
}

pub fn controller(addr: SocketAddr, session: Session, sync: MutationSync) -> SyncController {
    SyncController::new(client(addr, session.clone()), session, sync)
}

pub fn controller_with(config: &AppConfig, session: Session) -> SyncController {
    let client = ExpenseClient::new(config, session.clone()).unwrap();
    SyncController::new(client, session, config.mutation_sync)
}

/// Counts the hit and applies auth and forced failures.
fn gate(server: &MockServer, headers: &HeaderMap) -> Result<(), Response> {
    let mut state = server.state.lock().unwrap();
    state.hits += 1;

    let expected = format!("Bearer {TOKEN}");
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);
    if !authorized {
        return Err((StatusCode::UNAUTHORIZED, r#"{"error":"invalid token"}"#).into_response());
    }
    if let Some((status, body)) = state.fail_with.clone() {
        return Err((status, body).into_response());
    }
    Ok(())
}

async fn list(State(server): State<MockServer>, headers: HeaderMap) -> Response {
    if let Err(res) = gate(&server, &headers) {
        return res;
    }
    let forced = server.state.lock().unwrap().fail_lists_with.clone();
    if let Some((status, body)) = forced {
        return (status, body).into_response();
    }
    Json(server.expenses()).into_response()
}

async fn create(
    State(server): State<MockServer>,
    headers: HeaderMap,
    Json(body): Json<ExpenseBody>,
) -> Response {
    if let Err(res) = gate(&server, &headers) {
        return res;
    }
    // Stored like a document database would: server id and full timestamp.
    let created = ExpenseView {
        id: Uuid::new_v4().simple().to_string(),
        amount: body.amount,
        category: body.category,
        description: body.description,
        date: format!("{}T00:00:00.000Z", body.date),
    };
    server.state.lock().unwrap().expenses.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update(
    State(server): State<MockServer>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<ExpenseBody>,
) -> Response {
    if let Err(res) = gate(&server, &headers) {
        return res;
    }
    let mut state = server.state.lock().unwrap();
    let Some(slot) = state.expenses.iter_mut().find(|e| e.id == id) else {
        return (StatusCode::NOT_FOUND, r#"{"error":"not found"}"#).into_response();
    };
    slot.amount = body.amount;
    slot.category = body.category;
    slot.description = body.description;
    slot.date = format!("{}T00:00:00.000Z", body.date);
    Json(slot.clone()).into_response()
}

async fn remove(
    State(server): State<MockServer>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(res) = gate(&server, &headers) {
        return res;
    }
    let mut state = server.state.lock().unwrap();
    let before = state.expenses.len();
    state.expenses.retain(|e| e.id != id);
    if state.expenses.len() == before {
        return (StatusCode::NOT_FOUND, r#"{"error":"not found"}"#).into_response();
    }
    StatusCode::OK.into_response()
}
