use std::time::Duration;

use axum::{
  Router,
  extract::Request,
  middleware,
  routing::{delete, get, post},
};
use jiff::{SignedDuration, Timestamp};
use libforgelink::prelude::*;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{api::config::Config, trace};

pub mod config;
pub mod dto;
pub mod errors;

pub mod handlers;
mod middlewares;

#[derive(Clone)]
pub struct AppState<D: ManufacturerDirectory, Q: QuoteHistory> {
  pub config: Config,
  pub prometheus: Option<PrometheusHandle>,
  pub engine: Forgelink<D, Q>,
  pub directory: D,
  pub cache: MemoryCache,
}

pub fn routes<D: ManufacturerDirectory, Q: QuoteHistory>(config: &Config, directory: D, quotes: Q) -> anyhow::Result<Router> {
  let engine = Forgelink::new(directory.clone(), quotes);
  let cache = MemoryCache::new(SignedDuration::from_secs(config.cache_ttl_seconds as i64));

  tokio::spawn({
    let cache = cache.clone();

    async move {
      loop {
        tokio::time::sleep(Duration::from_secs(5 * 60)).await;

        cache.purge_expired(Timestamp::now());
      }
    }
  });

  let prometheus = match config.enable_prometheus {
    true => Some(trace::build_prometheus()?),
    false => None,
  };

  let state = AppState {
    config: config.clone(),
    prometheus,
    engine,
    directory,
    cache,
  };

  Ok(
    Router::new()
      .route("/recommendations", post(handlers::recommendations))
      .route("/recommendations/cache", delete(handlers::purge_cache))
      .fallback(handlers::not_found)
      .layer(TimeoutLayer::new(Duration::from_secs(30)))
      .layer(middleware::from_fn(middlewares::metrics))
      .layer(TraceLayer::new_for_http().make_span_with(|_req: &Request| {
        let request_id = Uuid::new_v4();

        tracing::info_span!("request", %request_id)
      }))
      // The routes below will not go through the observability middlewares above
      .route("/healthz", get(handlers::healthz))
      .route("/readyz", get(handlers::readyz))
      .route("/metrics", get(handlers::prometheus))
      .layer(middleware::from_fn(middlewares::logging::api_logger))
      .layer(middleware::from_fn(middlewares::request_id))
      .with_state(state),
  )
}
