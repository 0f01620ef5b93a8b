#[derive(Debug, thiserror::Error)]
pub enum MatchError {
  #[error("invalid order: {0}")]
  InvalidOrder(String),
  #[error("manufacturer directory unavailable: {0}")]
  Directory(String),
  #[error("quote history unavailable: {0}")]
  QuoteLookup(String),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}
