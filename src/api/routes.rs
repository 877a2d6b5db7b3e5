//! Handlers. Each one hands the ledger work to the blocking pool, since the
//! store is a synchronous SQLite connection.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
};
use serde_json::Value;

use crate::api::dto::{BalanceResponse, TargetResponse, TargetUpdatedResponse};
use crate::api::errors::ApiError;
use crate::core::input::{INVALID_MINUTES, INVALID_TARGET, parse_minutes, parse_target};
use crate::core::{Ledger, LedgerState};
use crate::errors::{AppError, AppResult};

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const APP_JS: &str = include_str!("../../assets/app.js");

type Shared = State<Arc<Ledger>>;

async fn with_ledger<T, F>(ledger: Arc<Ledger>, func: F) -> Result<T, ApiError>
where
    F: FnOnce(&Ledger) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || func(&ledger))
        .await
        .map_err(|e| AppError::Server(format!("ledger task failed: {e}")))?
        .map_err(ApiError::from)
}

/// Unwrap a JSON body, mapping any rejection to the endpoint's input error.
fn json_body(payload: Result<Json<Value>, JsonRejection>, invalid: &'static str) -> AppResult<Value> {
    match payload {
        Ok(Json(v)) => Ok(v),
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable request body");
            Err(AppError::invalid_input(invalid))
        }
    }
}

/// Rejected input still reconciles before the error goes back.
fn reconciled<T>(ledger: &Ledger, parsed: AppResult<T>) -> AppResult<T> {
    if parsed.is_err() {
        ledger.reconcile()?;
    }
    parsed
}

pub async fn index(State(ledger): Shared) -> Result<Html<&'static str>, ApiError> {
    with_ledger(ledger, |l| l.reconcile()).await?;
    Ok(Html(INDEX_HTML))
}

pub async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], APP_JS)
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /api/state
pub async fn state(State(ledger): Shared) -> Result<Json<LedgerState>, ApiError> {
    let st = with_ledger(ledger, |l| l.state()).await?;
    Ok(Json(st))
}

/// POST /api/work
pub async fn work(
    State(ledger): Shared,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let minutes = json_body(payload, INVALID_MINUTES).and_then(|body| parse_minutes(&body));
    let balance = with_ledger(ledger, move |l| l.add_work(reconciled(l, minutes)?)).await?;
    Ok(Json(BalanceResponse { ok: true, balance }))
}

/// POST /api/relax
pub async fn relax(
    State(ledger): Shared,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let minutes = json_body(payload, INVALID_MINUTES).and_then(|body| parse_minutes(&body));
    let balance = with_ledger(ledger, move |l| l.spend_relax(reconciled(l, minutes)?)).await?;
    Ok(Json(BalanceResponse { ok: true, balance }))
}

/// GET /api/target
pub async fn get_target(State(ledger): Shared) -> Result<Json<TargetResponse>, ApiError> {
    let target = with_ledger(ledger, |l| l.target()).await?;
    Ok(Json(TargetResponse { target }))
}

/// POST /api/target
pub async fn set_target(
    State(ledger): Shared,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TargetUpdatedResponse>, ApiError> {
    let target = json_body(payload, INVALID_TARGET).and_then(|body| parse_target(&body));
    let target = with_ledger(ledger, move |l| l.set_target(reconciled(l, target)?)).await?;
    Ok(Json(TargetUpdatedResponse { ok: true, target }))
}
