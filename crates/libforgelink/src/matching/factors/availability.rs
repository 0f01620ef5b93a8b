use bumpalo::Bump;
use libforgelink_macros::scoring_factor;

use crate::{
  matching::{Factor, ScoringContext, thresholds::*},
  model::{ManufacturerProfile, Order},
};

#[scoring_factor(Availability, name = "availability", weight = 5.0)]
fn score(&self, _bump: &Bump, order: &Order, candidate: &ManufacturerProfile, ctx: &ScoringContext) -> f64 {
  let lead_days = effective_lead_days(candidate);

  if lead_days <= 1.0 {
    AVAILABILITY_WEIGHT
  } else if lead_days <= 7.0 {
    4.0
  } else if lead_days <= 14.0 {
    3.0
  } else {
    let finishes_at = ctx.now.as_second() + (lead_days * 86_400.0) as i64;

    if finishes_at <= order.delivery_deadline.as_second() { 2.0 } else { 1.0 }
  }
}

pub(crate) fn effective_lead_days(candidate: &ManufacturerProfile) -> f64 {
  let lead = candidate.lead_time_days as f64;

  if candidate.rush_capable { lead * RUSH_LEAD_TIME_FACTOR } else { lead }
}

#[cfg(test)]
mod tests {
  use bumpalo::Bump;
  use jiff::{SignedDuration, Timestamp};

  use crate::{
    matching::{Factor, ScoringContext},
    model::{ManufacturerProfile, Order},
  };

  fn score(candidate: &ManufacturerProfile, deadline_days: i64) -> f64 {
    let now = Timestamp::now();
    let order = Order::builder("CNC Machining").deadline(now.saturating_add(SignedDuration::from_hours(24 * deadline_days)).unwrap()).build();
    let ctx = ScoringContext { now, quotes: &[] };

    super::Availability.score(&Bump::new(), &order, candidate, &ctx)
  }

  #[test]
  fn next_day_turnaround_scores_the_full_budget() {
    let candidate = ManufacturerProfile::builder("Express").lead_time_days(1).build();

    assert_eq!(score(&candidate, 30), 5.0);
  }

  #[test]
  fn rush_capability_compresses_the_lead_time() {
    let slow = ManufacturerProfile::builder("Slow").lead_time_days(10).build();
    let rushed = ManufacturerProfile::builder("Rushed").lead_time_days(10).rush_capable(true).build();

    assert_eq!(score(&slow, 60), 3.0);
    // 10 * 0.7 = 7 days, one tier up.
    assert_eq!(score(&rushed, 60), 4.0);
  }

  #[test]
  fn long_lead_time_that_fits_the_deadline_beats_one_that_does_not() {
    let candidate = ManufacturerProfile::builder("Patient").lead_time_days(30).build();

    assert_eq!(score(&candidate, 60), 2.0);
    assert_eq!(score(&candidate, 20), 1.0);
  }
}
