//! In-process mock of the Spinnaker API for tests
//!
//! Responses are canned per endpoint. Execution lookups are answered from a
//! queue so a test can script a status sequence (RUNNING, then SUCCEEDED...).
//! Every request is recorded as `"<METHOD> <path and query>"`.

use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use spinnaker_core::domain::source::Source;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

type Canned = (StatusCode, String);

#[derive(Default)]
struct MockState {
    application: Option<Canned>,
    pipeline_configs: Option<Canned>,
    executions: Option<Canned>,
    execution: VecDeque<Canned>,
    trigger: Option<Canned>,
    stage_start: Option<Canned>,
    requests: Vec<String>,
    bodies: Vec<String>,
}

/// Builder and handle for a mock API listening on a random local port
#[derive(Clone, Default)]
pub struct MockSpinnaker {
    state: Arc<Mutex<MockState>>,
}

/// A running mock API
pub struct RunningMock {
    pub url: String,
    state: Arc<Mutex<MockState>>,
}

fn canned(status: StatusCode, body: Value) -> Canned {
    (status, body.to_string())
}

impl MockSpinnaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that accepts application `bar` with pipeline `foo`
    pub fn verified() -> Self {
        Self::new()
            .application(StatusCode::OK, serde_json::json!({"name": "bar"}))
            .pipeline_configs(StatusCode::OK, serde_json::json!([{"name": "foo"}]))
    }

    pub fn application(self, status: StatusCode, body: Value) -> Self {
        self.lock().application = Some(canned(status, body));
        self
    }

    pub fn pipeline_configs(self, status: StatusCode, body: Value) -> Self {
        self.lock().pipeline_configs = Some(canned(status, body));
        self
    }

    pub fn executions(self, status: StatusCode, body: Value) -> Self {
        self.lock().executions = Some(canned(status, body));
        self
    }

    /// Queue one response for `GET /pipelines/{id}`
    pub fn execution(self, status: StatusCode, body: Value) -> Self {
        self.lock().execution.push_back(canned(status, body));
        self
    }

    pub fn trigger(self, status: StatusCode, body: Value) -> Self {
        self.lock().trigger = Some(canned(status, body));
        self
    }

    pub fn stage_start(self, status: StatusCode) -> Self {
        self.lock().stage_start = Some((status, String::new()));
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    /// Bind to a random local port and serve in the background
    pub async fn start(self) -> RunningMock {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&self.state));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RunningMock {
            url: format!("http://{addr}"),
            state: self.state,
        }
    }
}

impl RunningMock {
    /// Requests received so far
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Request bodies received so far, in order
    pub fn bodies(&self) -> Vec<String> {
        self.state.lock().unwrap().bodies.clone()
    }
}

/// Source pointing at `url` for application `bar` and pipeline `foo`
pub fn source_for(url: &str) -> Source {
    Source {
        spinnaker_api: url.to_string(),
        spinnaker_application: "bar".to_string(),
        spinnaker_pipeline: "foo".to_string(),
        ..Default::default()
    }
}

async fn handle(
    State(state): State<Arc<Mutex<MockState>>>,
    method: Method,
    uri: Uri,
    body: String,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("{method} {uri}"));
    if !body.is_empty() {
        state.bodies.push(body);
    }

    let segments: Vec<&str> = uri.path().trim_matches('/').split('/').collect();

    let reply = match (method, segments.as_slice()) {
        (Method::GET, ["applications", _]) => state.application.clone(),
        (Method::GET, ["applications", _, "pipelineConfigs"]) => state.pipeline_configs.clone(),
        (Method::GET, ["applications", _, "pipelines"]) => state.executions.clone(),
        (Method::GET, ["pipelines", _]) => state.execution.pop_front(),
        (Method::POST, ["pipelines", _, _]) => state.trigger.clone(),
        (Method::POST, ["concourse", "stage", "start"]) => state.stage_start.clone(),
        _ => None,
    };

    match reply {
        Some((status, body)) => (status, [(header::CONTENT_TYPE, "application/json")], body)
            .into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "unexpected request").into_response(),
    }
}
