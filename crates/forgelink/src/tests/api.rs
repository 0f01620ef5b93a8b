use axum::{
  Router,
  routing::{delete, post},
};
use axum_test::TestServer;
use jiff::{SignedDuration, Timestamp};
use libforgelink::prelude::*;
use serde_json::json;

use crate::api::{AppState, config::Config, handlers};

fn pool(now: Timestamp) -> Vec<ManufacturerProfile> {
  let quote = |days_ago: i64, price: f64| QuotePoint {
    price,
    quoted_at: now.saturating_sub(SignedDuration::from_hours(24 * days_ago)).unwrap(),
  };

  vec![
    ManufacturerProfile::builder("Apex Machining")
      .processes(&["CNC Machining"])
      .materials(&["6061 aluminum"])
      .certifications(&["ISO 9001"])
      .completed_orders(150)
      .overall_rating(4.9)
      .quality_rating(4.8)
      .on_time_rate(0.97)
      .lead_time_days(7)
      .country("United States")
      .recent_quotes(vec![quote(20, 1_500.0), quote(40, 1_700.0)])
      .build(),
    ManufacturerProfile::builder("Budget Mills")
      .processes(&["CNC Machining"])
      .materials(&["mild steel"])
      .completed_orders(30)
      .overall_rating(3.8)
      .lead_time_days(25)
      .country("Vietnam")
      .recent_quotes(vec![quote(15, 2_600.0)])
      .build(),
  ]
}

fn make_server<Q: QuoteHistory>(directory: InMemoryDirectory, quotes: Q) -> TestServer {
  let state = AppState {
    config: Config::default(),
    prometheus: None,
    engine: Forgelink::new(directory.clone(), quotes),
    directory,
    cache: MemoryCache::new(SignedDuration::from_secs(300)),
  };

  let app = Router::new()
    .route("/recommendations", post(handlers::recommendations))
    .route("/recommendations/cache", delete(handlers::purge_cache))
    .with_state(state);

  TestServer::new(app)
}

fn profile_backed_server() -> TestServer {
  let directory = InMemoryDirectory::with_profiles(pool(Timestamp::now()));
  let quotes = ProfileQuotes::from_profiles(directory.profiles());

  make_server(directory, quotes)
}

fn payload() -> serde_json::Value {
  let deadline = Timestamp::now().saturating_add(SignedDuration::from_hours(24 * 45)).unwrap().to_string();

  json!({
    "order": {
      "id": "a9f0a3c1-22de-4a6e-9c9e-0e5f1b2a3c4d",
      "requirements": {
        "processes": ["CNC Machining"],
        "materials": ["6061 aluminum"]
      },
      "quantity": 50,
      "budget": { "min": 1200.0, "max": 2400.0 },
      "delivery_deadline": deadline
    }
  })
}

#[tokio::test]
async fn recommendations_rank_the_pool() {
  let server = profile_backed_server();

  let response = server.post("/recommendations").json(&payload()).await;

  response.assert_status_ok();

  let body: serde_json::Value = response.json();

  assert_eq!(body["source"], "full-engine");
  assert_eq!(body["cached"], false);
  assert_eq!(body["top_matches"][0]["manufacturer_name"], "Apex Machining");
  assert_eq!(body["top_matches"][0]["rank"], 1);
  assert!(body["top_matches"][0]["breakdown"]["total_score"].as_f64().unwrap() >= 60.0);
  assert!(body["qualified_matches"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn payload_without_processes_fails_validation() {
  let server = profile_backed_server();

  let mut body = payload();
  body["order"]["requirements"]["processes"] = json!([]);

  let response = server.post("/recommendations").json(&body).await;

  response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn inverted_budget_is_a_bad_request() {
  let server = profile_backed_server();

  let mut body = payload();
  body["order"]["budget"] = json!({ "min": 5_000.0, "max": 1_000.0 });

  let response = server.post("/recommendations").json(&body).await;

  response.assert_status_bad_request();
}

#[tokio::test]
async fn quote_outage_serves_the_fallback_heuristic() {
  let server = make_server(InMemoryDirectory::with_profiles(pool(Timestamp::now())), UnavailableQuotes);

  let response = server.post("/recommendations").json(&payload()).await;

  response.assert_status_ok();

  let body: serde_json::Value = response.json();

  assert_eq!(body["source"], "fallback-heuristic");
  assert!(!body["top_matches"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_requests_are_served_from_the_cache() {
  let server = profile_backed_server();
  let payload = payload();

  let first: serde_json::Value = server.post("/recommendations").json(&payload).await.json();
  let second: serde_json::Value = server.post("/recommendations").json(&payload).await.json();

  assert_eq!(first["cached"], false);
  assert_eq!(second["cached"], true);
  assert_eq!(first["top_matches"], second["top_matches"]);
}

#[tokio::test]
async fn purging_the_cache_forces_a_fresh_ranking() {
  let server = profile_backed_server();
  let payload = payload();

  let _ = server.post("/recommendations").json(&payload).await;

  server.delete("/recommendations/cache").await.assert_status(axum::http::StatusCode::NO_CONTENT);

  let fresh: serde_json::Value = server.post("/recommendations").json(&payload).await.json();

  assert_eq!(fresh["cached"], false);
}

#[tokio::test]
async fn urgency_boost_is_accepted_as_a_query_parameter() {
  let server = profile_backed_server();

  let response = server.post("/recommendations").add_query_param("urgency_boost", 2.0).add_query_param("max_recommendations", 5).json(&payload()).await;

  response.assert_status_ok();

  let body: serde_json::Value = response.json();
  let ranks = body["top_matches"].as_array().unwrap().iter().map(|m| m["rank"].as_u64().unwrap()).collect::<Vec<_>>();

  assert_eq!(ranks, (1..=ranks.len() as u64).collect::<Vec<_>>());
}
