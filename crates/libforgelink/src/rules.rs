use crate::{
  matching::thresholds::{MAX_RECOMMENDATIONS, MIN_QUALIFIED_MATCHES},
  model::ManufacturerMatch,
};

pub struct GateOutcome {
  pub matches: Vec<ManufacturerMatch>,
  /// Returned matches meeting the floor.
  pub qualified: usize,
  /// True when below-floor candidates were pulled in to reach the minimum.
  pub backfilled: bool,
}

/// Business-rule gate: stable sort by descending total (ties keep their
/// insertion order, which tests rely on), drop below-floor candidates,
/// backfill with the best of them when fewer than three qualify, cap the
/// list, and hand out contiguous 1-based ranks.
pub fn apply_rules(mut matches: Vec<ManufacturerMatch>, floor: f64, limit: usize) -> GateOutcome {
  matches.sort_by(|lhs, rhs| rhs.breakdown.total_score.total_cmp(&lhs.breakdown.total_score));

  let qualified = matches.iter().take_while(|candidate| candidate.breakdown.total_score >= floor).count();
  let kept = if qualified < MIN_QUALIFIED_MATCHES { MIN_QUALIFIED_MATCHES.min(matches.len()) } else { qualified };

  matches.truncate(kept.min(limit.min(MAX_RECOMMENDATIONS)));

  let qualified = matches.iter().filter(|candidate| candidate.breakdown.total_score >= floor).count();
  let backfilled = matches.len() > qualified;

  for (position, candidate) in matches.iter_mut().enumerate() {
    candidate.rank = position + 1;
  }

  GateOutcome { matches, qualified, backfilled }
}
