//! Capability doubles and the in-process mock management API used by the
//! flow tests.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::DialectId;
use tokio::net::TcpListener;

use crate::capabilities::{
    ConsoleContext, Navigator, NotificationLevel, Notifier, PassthroughTranslator,
};
use crate::rest::RestResourceClient;

pub(crate) struct RecordingNotifier {
    events: Mutex<Vec<(NotificationLevel, String, String)>>,
}

impl RecordingNotifier {
    pub(crate) fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn events(&self) -> Vec<(NotificationLevel, String, String)> {
        self.events.lock().expect("notifier lock").clone()
    }

    pub(crate) fn count(&self, level: NotificationLevel) -> usize {
        self.events()
            .iter()
            .filter(|(recorded, _, _)| *recorded == level)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str, description: &str) {
        self.events
            .lock()
            .expect("notifier lock")
            .push((level, message.to_string(), description.to_string()));
    }
}

pub(crate) struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn new() -> Self {
        Self {
            paths: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.paths.lock().expect("navigator lock").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str) {
        self.paths
            .lock()
            .expect("navigator lock")
            .push(path.to_string());
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockApiState {
    pub(crate) fail_dialect_create: bool,
    pub(crate) group_count: u64,
    pub(crate) created: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockApiState {
    pub(crate) fn created(&self) -> Vec<(String, Value)> {
        self.created.lock().expect("created lock").clone()
    }

    pub(crate) fn created_in(&self, collection: &str) -> Vec<Value> {
        self.created()
            .into_iter()
            .filter(|(recorded, _)| recorded == collection)
            .map(|(_, payload)| payload)
            .collect()
    }
}

async fn create_dialect(
    State(state): State<MockApiState>,
    Json(payload): Json<Value>,
) -> axum::response::Response {
    if state.fail_dialect_create {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "message": "duplicate dialect",
                "description": "A dialect with this URI already exists.",
            })),
        )
            .into_response();
    }

    let dialect_uri = payload["dialectURI"].as_str().unwrap_or_default().to_string();
    state
        .created
        .lock()
        .expect("created lock")
        .push(("claim-dialects".to_string(), payload));
    let id = DialectId::from_uri(&dialect_uri);
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/claim-dialects/{id}"))],
    )
        .into_response()
}

async fn list_dialects(State(state): State<MockApiState>) -> Json<Value> {
    let dialects: Vec<Value> = state
        .created_in("claim-dialects")
        .into_iter()
        .map(|payload| {
            let uri = payload["dialectURI"].as_str().unwrap_or_default().to_string();
            json!({ "id": DialectId::from_uri(&uri), "dialectURI": uri })
        })
        .collect();
    Json(Value::Array(dialects))
}

async fn create_claim(
    State(state): State<MockApiState>,
    Path(_dialect_id): Path<String>,
    Json(payload): Json<Value>,
) -> axum::response::Response {
    if payload["claimURI"].as_str().unwrap_or_default().contains("fail") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "message": "claim create failed",
                "description": "The server was unable to add the claim mapping.",
            })),
        )
            .into_response();
    }

    state
        .created
        .lock()
        .expect("created lock")
        .push(("claims".to_string(), payload));
    StatusCode::CREATED.into_response()
}

async fn list_claims(
    State(state): State<MockApiState>,
    Path(dialect_id): Path<String>,
) -> Json<Value> {
    let claims: Vec<Value> = state
        .created_in("claims")
        .into_iter()
        .enumerate()
        .map(|(index, payload)| {
            json!({
                "id": format!("claim-{index}"),
                "claimURI": payload["claimURI"],
                "claimDialectURI": dialect_id,
                "mappedLocalClaimURI": payload["mappedLocalClaimURI"],
            })
        })
        .collect();
    Json(Value::Array(claims))
}

async fn create_group(
    State(state): State<MockApiState>,
    Json(payload): Json<Value>,
) -> axum::response::Response {
    state
        .created
        .lock()
        .expect("created lock")
        .push(("Groups".to_string(), payload));
    (
        StatusCode::CREATED,
        [(header::LOCATION, "/Groups/9f3a-1".to_string())],
    )
        .into_response()
}

async fn search_groups(State(state): State<MockApiState>) -> Json<Value> {
    Json(json!({ "totalResults": state.group_count }))
}

async fn list_user_stores() -> Json<Value> {
    Json(json!([
        { "name": "SALES", "rolenameRegEx": "^[A-Z]{3,30}$" }
    ]))
}

pub(crate) async fn spawn_mock_api(state: MockApiState) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/claim-dialects", post(create_dialect).get(list_dialects))
        .route(
            "/claim-dialects/:dialect_id/claims",
            post(create_claim).get(list_claims),
        )
        .route("/Groups", post(create_group))
        .route("/Groups/.search", post(search_groups))
        .route("/userstores", get(list_user_stores))
        .with_state(state);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

pub(crate) fn context_for(
    server_url: &str,
) -> (ConsoleContext, Arc<RecordingNotifier>, Arc<RecordingNavigator>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let ctx = ConsoleContext::new(
        Arc::new(RestResourceClient::new(server_url)),
        notifier.clone(),
        Arc::new(PassthroughTranslator),
        navigator.clone(),
    );
    (ctx, notifier, navigator)
}
