use bumpalo::Bump;
use libforgelink_macros::scoring_factor;

use crate::{
  matching::{Factor, ScoringContext, thresholds::*},
  model::{ManufacturerProfile, Order},
};

#[scoring_factor(PerformanceHistory, name = "performance_history", weight = 25.0)]
fn score(&self, _bump: &Bump, _order: &Order, candidate: &ManufacturerProfile, _ctx: &ScoringContext) -> f64 {
  let stats = &candidate.stats;

  // No amount of stellar ratings substitutes for an actual track record.
  if stats.completed_orders < MIN_TRACK_RECORD_ORDERS {
    return PERFORMANCE_FLOOR_POINTS;
  }

  let mut signals = Vec::with_capacity(4);

  if let Some(rating) = stats.overall_rating {
    signals.push((rating / 5.0 * 100.0).clamp(0.0, 100.0));
  }
  if let Some(rate) = stats.on_time_rate {
    signals.push((rate * 100.0).clamp(0.0, 100.0));
  }
  if let Some(rating) = stats.quality_rating {
    signals.push((rating / 5.0 * 100.0).clamp(0.0, 100.0));
  }
  if let Some(hours) = stats.avg_response_hours {
    signals.push(response_score(hours));
  }

  let proxy = if signals.is_empty() {
    // No rating signals at all: fall back on volume alone.
    match stats.completed_orders {
      50.. => 85.0,
      20.. => 75.0,
      _ => 65.0,
    }
  } else {
    signals.iter().sum::<f64>() / signals.len() as f64
  };

  if proxy >= 95.0 {
    PERFORMANCE_WEIGHT
  } else if proxy >= 85.0 {
    20.0
  } else if proxy >= 70.0 {
    15.0
  } else {
    PERFORMANCE_FLOOR_POINTS
  }
}

/// Responsiveness as a 0-100 signal: answering within the hour is worth ~95,
/// a full day ~50, linear in between.
fn response_score(hours: f64) -> f64 {
  (95.0 - (hours - 1.0) * 45.0 / 23.0).clamp(10.0, 95.0)
}

#[cfg(test)]
mod tests {
  use bumpalo::Bump;
  use float_cmp::assert_approx_eq;
  use jiff::Timestamp;

  use crate::{
    matching::{Factor, ScoringContext},
    model::{ManufacturerProfile, Order},
  };

  fn score(candidate: &ManufacturerProfile) -> f64 {
    let order = Order::builder("CNC Machining").build();
    let ctx = ScoringContext { now: Timestamp::now(), quotes: &[] };

    super::PerformanceHistory.score(&Bump::new(), &order, candidate, &ctx)
  }

  #[test]
  fn no_track_record_is_floored_regardless_of_ratings() {
    let candidate = ManufacturerProfile::builder("Newcomer").overall_rating(5.0).quality_rating(5.0).on_time_rate(1.0).build();

    assert_eq!(score(&candidate), 5.0);
  }

  #[test]
  fn four_completed_orders_still_count_as_no_track_record() {
    let candidate = ManufacturerProfile::builder("AlmostThere").completed_orders(4).overall_rating(5.0).build();

    assert_eq!(score(&candidate), 5.0);
  }

  #[test]
  fn perfect_signals_earn_the_full_bracket() {
    let candidate = ManufacturerProfile::builder("Veteran").completed_orders(120).overall_rating(5.0).quality_rating(5.0).on_time_rate(0.98).avg_response_hours(1.0).build();

    // (100 + 98 + 100 + 95) / 4 = 98.25 >= 95.
    assert_eq!(score(&candidate), 25.0);
  }

  #[test]
  fn volume_fallback_when_no_signals_are_recorded() {
    assert_eq!(score(&ManufacturerProfile::builder("Busy").completed_orders(60).build()), 20.0);
    assert_eq!(score(&ManufacturerProfile::builder("Steady").completed_orders(25).build()), 15.0);
    assert_eq!(score(&ManufacturerProfile::builder("Quiet").completed_orders(8).build()), 5.0);
  }

  #[test]
  fn raising_the_rating_never_lowers_the_score() {
    let mut previous = 0.0;

    for rating in [2.0, 3.0, 3.5, 4.0, 4.5, 5.0] {
      let candidate = ManufacturerProfile::builder("Shop").completed_orders(40).overall_rating(rating).build();
      let score = score(&candidate);

      assert!(score >= previous, "score regressed from {previous} to {score} at rating {rating}");
      previous = score;
    }
  }

  #[test]
  fn response_score_endpoints() {
    assert_approx_eq!(f64, super::response_score(1.0), 95.0);
    assert_approx_eq!(f64, super::response_score(24.0), 50.0);
    assert_approx_eq!(f64, super::response_score(0.25), 95.0);
    assert_approx_eq!(f64, super::response_score(72.0), 10.0);
  }
}
