mod recommendations;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use libforgelink::prelude::*;

use crate::api::{AppState, errors::AppError};

pub use self::recommendations::{purge_cache, recommendations};

pub async fn not_found() -> impl IntoResponse {
  AppError::ResourceNotFound
}

pub async fn healthz() -> StatusCode {
  StatusCode::OK
}

pub async fn readyz<D: ManufacturerDirectory, Q: QuoteHistory>(State(state): State<AppState<D, Q>>) -> StatusCode {
  match state.engine.health().await {
    Ok(true) => StatusCode::OK,
    _ => StatusCode::SERVICE_UNAVAILABLE,
  }
}

pub async fn prometheus<D: ManufacturerDirectory, Q: QuoteHistory>(State(state): State<AppState<D, Q>>) -> impl IntoResponse {
  match &state.prometheus {
    Some(handle) => handle.render().into_response(),
    None => StatusCode::NOT_FOUND.into_response(),
  }
}
