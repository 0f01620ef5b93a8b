mod api;
mod trace;

#[cfg(test)]
mod tests;

use anyhow::Context;
use libforgelink::prelude::*;
use tokio::signal;

use crate::api::config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let config = Config::from_env()?;

  let directory = match &config.pool_path {
    Some(path) => {
      let payload = std::fs::read_to_string(path).with_context(|| format!("could not read manufacturer pool from {path}"))?;

      InMemoryDirectory::from_json(&payload)?
    }

    None => InMemoryDirectory::default(),
  };

  let quotes = ProfileQuotes::from_profiles(directory.profiles());

  run(config, directory, quotes).await
}

async fn run<D: ManufacturerDirectory, Q: QuoteHistory>(config: Config, directory: D, quotes: Q) -> anyhow::Result<()> {
  let _guard = trace::init_tracing(&config, std::io::stdout());
  let app = api::routes(&config, directory, quotes)?;
  let listener = tokio::net::TcpListener::bind(&config.listen_addr).await.expect("could not create listener");

  tracing::info!("listening on {}", listener.local_addr()?.to_string());

  axum::serve(listener, app).with_graceful_shutdown(shutdown()).await.expect("could not start app");

  Ok(())
}

async fn shutdown() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("failed to install ^C handler");
  };

  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("failed to install terminate signal handler")
      .recv()
      .await;
  };

  tokio::select! {
      () = ctrl_c => tracing::info!("received ^C, initiating shutdown"),
      () = terminate => tracing::info!("received terminate signal, initiating shutdown"),
  }
}
