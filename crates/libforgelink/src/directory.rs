use std::sync::Arc;

use anyhow::Context;

use crate::{
  error::MatchError,
  model::{ManufacturerProfile, Order},
};

/// Read-only access to the manufacturer pool. The production implementation
/// lives with the database collaborator; this crate ships an in-memory one.
#[allow(async_fn_in_trait)]
pub trait ManufacturerDirectory: Clone + Send + Sync + 'static {
  fn health(&self) -> impl Future<Output = Result<bool, MatchError>> + Send;
  /// A fresh snapshot of candidates for the given order.
  fn candidates(&self, order: &Order) -> impl Future<Output = Result<Vec<ManufacturerProfile>, MatchError>> + Send;
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory {
  profiles: Arc<Vec<ManufacturerProfile>>,
}

impl InMemoryDirectory {
  pub fn with_profiles(profiles: Vec<ManufacturerProfile>) -> InMemoryDirectory {
    InMemoryDirectory { profiles: Arc::new(profiles) }
  }

  pub fn from_json(payload: &str) -> Result<InMemoryDirectory, MatchError> {
    let profiles: Vec<ManufacturerProfile> = serde_json::from_str(payload).context("could not parse manufacturer pool")?;

    Ok(InMemoryDirectory::with_profiles(profiles))
  }

  pub fn profiles(&self) -> &[ManufacturerProfile] {
    &self.profiles
  }
}

impl ManufacturerDirectory for InMemoryDirectory {
  async fn health(&self) -> Result<bool, MatchError> {
    Ok(true)
  }

  async fn candidates(&self, _: &Order) -> Result<Vec<ManufacturerProfile>, MatchError> {
    Ok(self.profiles.as_ref().clone())
  }
}
