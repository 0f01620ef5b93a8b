use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{Query, QueryRejection, WithRejection};
use jiff::Timestamp;
use libforgelink::prelude::*;
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{RecommendPayload, RecommendResponse},
  errors::AppError,
  middlewares::json_rejection::TypedJson,
};

#[instrument(skip_all)]
pub async fn recommendations<D: ManufacturerDirectory, Q: QuoteHistory>(
  State(state): State<AppState<D, Q>>,
  WithRejection(Query(params), _): WithRejection<Query<MatchParams>, QueryRejection>,
  TypedJson(payload): TypedJson<RecommendPayload>,
) -> Result<(StatusCode, impl IntoResponse), AppError> {
  let order = payload.order;
  let now = Timestamp::now();
  let caching = state.config.cache_ttl_seconds > 0;

  if caching
    && let Some(outcome) = state.cache.get(order.id, now)
  {
    tracing::debug!(order_id = %order.id, "serving recommendations from cache");

    return Ok((StatusCode::OK, Json(RecommendResponse { outcome, cached: true })));
  }

  let outcome = match state.engine.rank_at(&order, &params, now).await {
    Ok(outcome) => outcome,

    // A dead quote collaborator degrades the response instead of failing it.
    Err(MatchError::QuoteLookup(err)) => {
      tracing::warn!(error = err, "quote history unavailable, serving the fallback heuristic");

      let pool = state.directory.candidates(&order).await?;

      rank_heuristic(&order, pool, &params, now)?
    }

    Err(err) => return Err(err.into()),
  };

  if caching {
    state.cache.put(order.id, outcome.clone(), now);
  }

  Ok((StatusCode::OK, Json(RecommendResponse { outcome, cached: false })))
}

pub async fn purge_cache<D: ManufacturerDirectory, Q: QuoteHistory>(State(state): State<AppState<D, Q>>) -> StatusCode {
  state.cache.clear();

  tracing::info!("recommendation cache cleared");

  StatusCode::NO_CONTENT
}
