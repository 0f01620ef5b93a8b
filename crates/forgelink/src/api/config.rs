use std::{
  env::{self, VarError},
  fmt::Display,
  str::FromStr,
};

use crate::api::errors::AppError;

#[derive(Clone, Debug)]
pub struct Config {
  pub env: Env,
  pub listen_addr: String,

  // Manufacturer pool
  pub pool_path: Option<String>,

  // Recommendation cache
  pub cache_ttl_seconds: u64,

  // Debugging
  pub enable_prometheus: bool,
}

impl Config {
  pub fn from_env() -> Result<Config, AppError> {
    Ok(Config {
      env: Env::from(env::var("ENV").unwrap_or("dev".into())),
      listen_addr: env::var("LISTEN_ADDR").unwrap_or("0.0.0.0:8000".into()),
      pool_path: env::var("POOL_PATH").ok(),
      cache_ttl_seconds: parse_env("CACHE_TTL_SECONDS", 300)?,
      enable_prometheus: env::var("ENABLE_PROMETHEUS").unwrap_or_default() == "1",
    })
  }
}

impl Default for Config {
  fn default() -> Config {
    Config {
      env: Env::Dev,
      listen_addr: "0.0.0.0:8000".into(),
      pool_path: None,
      cache_ttl_seconds: 300,
      enable_prometheus: false,
    }
  }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Env {
  Dev,
  Production,
}

impl From<String> for Env {
  fn from(value: String) -> Self {
    match value.as_ref() {
      "production" => Env::Production,
      _ => Env::Dev,
    }
  }
}

pub fn parse_env<T>(name: &str, default: T) -> anyhow::Result<T>
where
  T: FromStr,
  T::Err: Display,
{
  match env::var(name) {
    Ok(value) if value.is_empty() => Ok(default),
    Ok(value) => Ok(value.parse::<T>().map_err(|err| AppError::ConfigError(format!("could not read {name}: {err}")))?),
    Err(err) => match err {
      VarError::NotPresent => Ok(default),
      _ => Err(AppError::ConfigError(format!("could not read {name}: {err}")).into()),
    },
  }
}
