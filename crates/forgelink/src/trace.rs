use std::io::Write;

use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::config::{Config, Env};

pub fn build_prometheus() -> Result<PrometheusHandle, BuildError> {
  PrometheusBuilder::new()
    .add_global_label("service", "forgelink")
    .set_buckets_for_metric(Matcher::Full("forgelink_scoring_scores".into()), &[20.0, 40.0, 60.0, 75.0, 90.0])?
    .set_buckets_for_metric(Matcher::Full("forgelink_scoring_latency_seconds".into()), &[0.0001, 0.0005, 0.001, 0.005, 0.02])?
    .install_recorder()
}

pub fn init_tracing(config: &Config, writer: impl Write + Send + 'static) -> WorkerGuard {
  let (appender, guard) = tracing_appender::non_blocking(writer);

  let formatter = match config.env {
    Env::Dev => fmt::layer().compact().with_writer(appender).with_ansi(cfg!(not(test))).boxed(),
    Env::Production => fmt::layer().json().flatten_event(true).with_writer(appender).boxed(),
  };

  let layers = EnvFilter::builder().try_from_env().or_else(|_| EnvFilter::try_new("info")).unwrap().and_then(formatter);

  tracing_subscriber::registry().with(layers).init();

  guard
}
