//! The weights, similarity thresholds, neutral defaults and gate limits of
//! the matching pipeline, in one place so tests can assert against them and
//! recalibration never touches scorer logic.

/// Factor maxima. Sub-scores come out already scaled to these, so the total
/// is a direct sum. They must add up to exactly 100.
pub const CAPABILITY_WEIGHT: f64 = 35.0;
pub const PERFORMANCE_WEIGHT: f64 = 25.0;
pub const QUALITY_WEIGHT: f64 = 15.0;
pub const PROXIMITY_WEIGHT: f64 = 12.0;
pub const COST_WEIGHT: f64 = 8.0;
pub const AVAILABILITY_WEIGHT: f64 = 5.0;

/// Coarse process-compatibility floor applied before scoring.
pub const PREFILTER_PROCESS_SIMILARITY: f64 = 40.0;

/// Capability tiers over the 0-100 token-sort scale.
pub const CAPABILITY_EXACT_MATCH_THRESHOLD: f64 = 90.0;
pub const CAPABILITY_STRONG_MATCH_THRESHOLD: f64 = 70.0;
pub const CAPABILITY_PARTIAL_MATCH_THRESHOLD: f64 = 50.0;
pub const CAPABILITY_STRONG_POINTS: f64 = 25.0;
pub const CAPABILITY_PARTIAL_POINTS: f64 = 15.0;
/// Awarded when technical specs are missing on either side. Sparse data is
/// scored as "adaptable", never as zero.
pub const CAPABILITY_ADAPTABLE_POINTS: f64 = 15.0;

/// Shares of the capability budget: process, materials, industry.
pub const CAPABILITY_PROCESS_SHARE: f64 = 0.60;
pub const CAPABILITY_MATERIAL_SHARE: f64 = 0.25;
pub const CAPABILITY_INDUSTRY_SHARE: f64 = 0.15;

pub const MATERIAL_MATCH_THRESHOLD: f64 = 60.0;
pub const INDUSTRY_STRONG_MATCH_THRESHOLD: f64 = 70.0;
pub const INDUSTRY_PARTIAL_MATCH_THRESHOLD: f64 = 40.0;

/// Below this many completed orders the performance factor is hard-capped at
/// its floor: there is no track record to score.
pub const MIN_TRACK_RECORD_ORDERS: u32 = 5;
pub const PERFORMANCE_FLOOR_POINTS: f64 = 5.0;

pub const CERTIFICATION_MATCH_THRESHOLD: f64 = 80.0;
pub const CERTIFICATION_BONUS: f64 = 0.5;
pub const CERTIFICATION_BONUS_CAP: f64 = 1.0;

pub const LOCATION_MATCH_THRESHOLD: f64 = 80.0;
pub const PROXIMITY_COUNTRY_POINTS: f64 = 8.0;
pub const PROXIMITY_CONTINENT_POINTS: f64 = 5.0;
pub const PROXIMITY_OVERSEAS_POINTS: f64 = 2.0;
/// Used when no location preference was given, or the candidate has no
/// recorded location: assume same-country production.
pub const DEFAULT_PROXIMITY_POINTS: f64 = 8.0;

pub const QUOTE_WINDOW_DAYS: i64 = 180;
pub const QUOTE_SAMPLE_LIMIT: usize = 20;
/// Used when there is no quote history or no budget: assume within budget.
pub const DEFAULT_COST_POINTS: f64 = 6.0;

/// Rush-capable manufacturers compress their stated lead time by this factor.
pub const RUSH_LEAD_TIME_FACTOR: f64 = 0.7;

/// Business-rule gate.
pub const DEFAULT_SCORE_FLOOR: f64 = 60.0;
pub const MIN_QUALIFIED_MATCHES: usize = 3;
pub const MAX_RECOMMENDATIONS: usize = 15;

/// Urgency boost only lifts matches that can actually deliver fast.
pub const URGENCY_AVAILABILITY_THRESHOLD: f64 = 4.0;
pub const URGENCY_BOOST_MIN: f64 = 1.0;
pub const URGENCY_BOOST_MAX: f64 = 3.0;

/// Mixing weights of the enhanced aggregation pass.
pub const ENHANCED_BASE_SHARE: f64 = 0.70;
pub const ENHANCED_COMPLEXITY_SHARE: f64 = 0.15;
pub const ENHANCED_PERSONALIZATION_SHARE: f64 = 0.10;
pub const ENHANCED_MARKET_SHARE: f64 = 0.05;

/// Confidence never claims certainty.
pub const CONFIDENCE_CEILING: f64 = 0.95;

#[cfg(test)]
mod tests {
  use float_cmp::assert_approx_eq;

  use super::*;

  #[test]
  fn factor_weights_sum_to_one_hundred() {
    let sum = CAPABILITY_WEIGHT + PERFORMANCE_WEIGHT + QUALITY_WEIGHT + PROXIMITY_WEIGHT + COST_WEIGHT + AVAILABILITY_WEIGHT;

    assert_approx_eq!(f64, sum, 100.0);
  }

  #[test]
  fn capability_shares_sum_to_one() {
    assert_approx_eq!(f64, CAPABILITY_PROCESS_SHARE + CAPABILITY_MATERIAL_SHARE + CAPABILITY_INDUSTRY_SHARE, 1.0);
  }

  #[test]
  fn enhanced_shares_sum_to_one() {
    assert_approx_eq!(f64, ENHANCED_BASE_SHARE + ENHANCED_COMPLEXITY_SHARE + ENHANCED_PERSONALIZATION_SHARE + ENHANCED_MARKET_SHARE, 1.0);
  }
}
