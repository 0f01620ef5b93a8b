use bumpalo::Bump;
use jiff::Timestamp;

use crate::{
  complexity::{analyze_complexity, recommended_options},
  engine::{estimate_timeline_days, market_insights},
  error::MatchError,
  explain::explain,
  matching::{
    Factor, MatchParams, ScoringContext,
    factors::{availability::Availability, performance::PerformanceHistory, proximity::GeographicProximity, quality::QualityMetrics},
    filters::filter_candidates,
    thresholds::*,
  },
  model::{CostEstimate, ManufacturerMatch, ManufacturerProfile, MatchOutcome, MatchScoreBreakdown, Order, RecommendationSource},
  rules::apply_rules,
};

/// Degraded ranking for when the full engine's collaborators are down:
/// capability and cost fall back to their neutral defaults and only the
/// factors derivable from the profile itself are scored. Produces the same
/// [`MatchOutcome`] shape, tagged with its source so callers and clients can
/// tell the two apart.
pub fn rank_heuristic(order: &Order, pool: Vec<ManufacturerProfile>, params: &MatchParams, now: Timestamp) -> Result<MatchOutcome, MatchError> {
  order.validate_at(now)?;

  let complexity = analyze_complexity(order, now);
  let pool_size = pool.len();

  let mut bump = Bump::with_capacity(1024);
  let candidates = filter_candidates(&bump, pool, order);
  let ctx = ScoringContext { now, quotes: &[] };

  let mut matches = Vec::with_capacity(candidates.len());

  for candidate in candidates {
    let performance = PerformanceHistory.score(&bump, order, &candidate, &ctx).clamp(0.0, PERFORMANCE_WEIGHT);
    let quality = QualityMetrics.score(&bump, order, &candidate, &ctx).clamp(0.0, QUALITY_WEIGHT);
    let proximity = GeographicProximity.score(&bump, order, &candidate, &ctx).clamp(0.0, PROXIMITY_WEIGHT);
    let availability = Availability.score(&bump, order, &candidate, &ctx).clamp(0.0, AVAILABILITY_WEIGHT);

    bump.reset();

    let mut breakdown = MatchScoreBreakdown {
      capability: CAPABILITY_ADAPTABLE_POINTS,
      performance,
      quality,
      proximity,
      cost: DEFAULT_COST_POINTS,
      availability,
      total_score: 0.0,
      complexity_adjusted_score: None,
    };

    breakdown.total_score = (breakdown.capability + performance + quality + proximity + breakdown.cost + availability).clamp(0.0, 100.0);

    let explanation = explain(&breakdown, &candidate);

    matches.push(ManufacturerMatch {
      manufacturer_id: candidate.id,
      manufacturer_name: candidate.name.clone(),
      rank: 0,
      strengths: explanation.strengths,
      concerns: explanation.concerns,
      confidence: explanation.confidence,
      estimated_cost: order.budget.map(|budget| CostEstimate { low: budget.min, high: budget.max }),
      estimated_timeline_days: estimate_timeline_days(&candidate),
      recommendation: explanation.recommendation,
      breakdown,
    });
  }

  let limit = params.max_recommendations.unwrap_or_else(|| recommended_options(&complexity));
  let gate = apply_rules(matches, params.min_score_floor, limit);
  let market_insights = market_insights(order, pool_size, &gate.matches, gate.backfilled);

  Ok(MatchOutcome {
    order_id: order.id,
    top_matches: gate.matches,
    qualified_matches: gate.qualified,
    backfilled: gate.backfilled,
    source: RecommendationSource::FallbackHeuristic,
    complexity,
    market_insights,
  })
}
