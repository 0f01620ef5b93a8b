pub(crate) mod comparers;
pub(crate) mod factors;
pub mod filters;
pub mod thresholds;

use bumpalo::Bump;
use jiff::Timestamp;
use serde::Deserialize;
use serde_inline_default::serde_inline_default;

use crate::{
  matching::factors::{availability::Availability, capability::CapabilityMatch, cost::CostEfficiency, performance::PerformanceHistory, proximity::GeographicProximity, quality::QualityMetrics},
  model::{ComplexityAnalysis, ManufacturerProfile, MatchScoreBreakdown, Order},
};

/// Read-only inputs shared by every factor for one candidate: the wall clock
/// pinned at the start of the run, and the candidate's recent quote prices
/// (already windowed and capped by the engine, newest first).
pub(crate) struct ScoringContext<'c> {
  pub now: Timestamp,
  pub quotes: &'c [f64],
}

pub(crate) trait Factor: Send + Sync {
  fn name(&self) -> &'static str;
  /// The factor's maximum: scores come out already scaled to it.
  fn weight(&self) -> f64;
  fn score(&self, bump: &Bump, order: &Order, candidate: &ManufacturerProfile, ctx: &ScoringContext) -> f64;
}

/// Declaration order matches the breakdown fields.
static FACTORS: [&dyn Factor; 6] = [&CapabilityMatch, &PerformanceHistory, &QualityMetrics, &GeographicProximity, &CostEfficiency, &Availability];

pub(crate) fn score_candidate(bump: &Bump, order: &Order, candidate: &ManufacturerProfile, ctx: &ScoringContext) -> MatchScoreBreakdown {
  let scores = FACTORS.map(|factor| {
    let score = factor.score(bump, order, candidate, ctx).clamp(0.0, factor.weight());

    tracing::debug!(factor = factor.name(), score, "computed factor score");

    score
  });

  let [capability, performance, quality, proximity, cost, availability] = scores;

  MatchScoreBreakdown {
    capability,
    performance,
    quality,
    proximity,
    cost,
    availability,
    total_score: (capability + performance + quality + proximity + cost + availability).clamp(0.0, 100.0),
    complexity_adjusted_score: None,
  }
}

/// Secondary aggregation pass. Recombines the audited total with a
/// complexity-fit component; the personalization and market-context inputs
/// default to the base total when their collaborators are absent, keeping the
/// blend neutral. Informational and tie-breaking only.
pub(crate) fn complexity_adjusted(breakdown: &MatchScoreBreakdown, complexity: &ComplexityAnalysis) -> f64 {
  let base = breakdown.total_score;
  let fit = complexity_fit(breakdown, complexity);

  thresholds::ENHANCED_BASE_SHARE * base + thresholds::ENHANCED_COMPLEXITY_SHARE * fit + thresholds::ENHANCED_PERSONALIZATION_SHARE * base + thresholds::ENHANCED_MARKET_SHARE * base
}

/// The harder the order, the more the fit leans on capability, quality and
/// track record instead of the flat total.
fn complexity_fit(breakdown: &MatchScoreBreakdown, complexity: &ComplexityAnalysis) -> f64 {
  let depth = (breakdown.capability / thresholds::CAPABILITY_WEIGHT * 0.5 + breakdown.quality / thresholds::QUALITY_WEIGHT * 0.3 + breakdown.performance / thresholds::PERFORMANCE_WEIGHT * 0.2) * 100.0;
  let difficulty = (complexity.score / 10.0).clamp(0.0, 1.0);

  breakdown.total_score * (1.0 - difficulty) + depth * difficulty
}

#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
pub struct MatchParams {
  /// Caps the returned list. Defaults to the complexity analyzer's
  /// recommended option count.
  #[serde(default)]
  pub max_recommendations: Option<usize>,
  #[serde_inline_default(thresholds::DEFAULT_SCORE_FLOOR)]
  pub min_score_floor: f64,
  /// Post-hoc multiplier (clamped to 1.0-3.0) on the sort key of matches
  /// whose availability meets the urgency threshold.
  #[serde(default)]
  pub urgency_boost: Option<f64>,
}

impl Default for MatchParams {
  fn default() -> Self {
    MatchParams {
      max_recommendations: None,
      min_score_floor: thresholds::DEFAULT_SCORE_FLOOR,
      urgency_boost: None,
    }
  }
}
