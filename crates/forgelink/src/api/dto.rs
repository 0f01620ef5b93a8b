use libforgelink::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct RecommendPayload {
  #[validate(nested)]
  pub order: Order,
}

#[derive(Serialize)]
pub(crate) struct RecommendResponse {
  #[serde(flatten)]
  pub outcome: MatchOutcome,
  /// True when the outcome was served from the recommendation cache.
  pub cached: bool,
}
