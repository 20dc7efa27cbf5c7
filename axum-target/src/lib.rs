//! Demo HTTP target exposing the endpoints the built-in load scenarios hit.
//! Every scenario endpoint records its `(method, path)` into a shared
//! [`HitLog`] so end-to-end tests can assert on observed traffic.

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use load_test_util::{HitLog, HitSnapshot, ItemResponse, LoginResponse, SessionCounter};
use serde::Deserialize;

const INDEX_BODY: &[u8] = b"<html><body>load target index</body></html>";

const MIN_ITEM_ID: u64 = 1;
const MAX_ITEM_ID: u64 = 10_000;

#[derive(Clone)]
pub struct TargetState {
    pub sessions: SessionCounter,
    pub log: HitLog,
}

impl TargetState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: SessionCounter::new(),
            log: HitLog::new(),
        }
    }
}

#[must_use]
pub fn router(state: TargetState) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route("/login", post(post_login))
        .route("/hello", get(get_hello))
        .route("/world", get(get_world))
        .route("/notfound", post(post_notfound))
        .route("/item", get(get_item))
        .route("/hits", get(get_hits))
        .with_state(state)
}

pub async fn serve(listener: tokio::net::TcpListener, state: TargetState) -> anyhow::Result<()> {
    axum::serve(listener, router(state))
        .await
        .context("target server exited")
}

#[inline]
async fn get_index(State(state): State<TargetState>) -> &'static [u8] {
    state.log.record(Method::GET, "/");
    INDEX_BODY
}

#[inline]
async fn post_login(State(state): State<TargetState>) -> Json<LoginResponse> {
    state.log.record(Method::POST, "/login");
    Json(state.sessions.next_session())
}

#[inline]
async fn get_hello(State(state): State<TargetState>) -> &'static str {
    state.log.record(Method::GET, "/hello");
    "hello"
}

#[inline]
async fn get_world(State(state): State<TargetState>) -> &'static str {
    state.log.record(Method::GET, "/world");
    "world"
}

// Always fails; scenarios use it to exercise failure recording.
#[inline]
async fn post_notfound(State(state): State<TargetState>) -> StatusCode {
    state.log.record(Method::POST, "/notfound");
    StatusCode::NOT_FOUND
}

#[derive(Debug, Deserialize)]
struct ItemParams {
    id: u64,
}

#[inline]
async fn get_item(
    State(state): State<TargetState>,
    Query(params): Query<ItemParams>,
) -> Result<Json<ItemResponse>, StatusCode> {
    state.log.record(Method::GET, "/item");
    if !(MIN_ITEM_ID..=MAX_ITEM_ID).contains(&params.id) {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(ItemResponse { id: params.id }))
}

// Observability for manual runs; deliberately not recorded.
#[inline]
async fn get_hits(State(state): State<TargetState>) -> Json<HitSnapshot> {
    Json(state.log.snapshot())
}
