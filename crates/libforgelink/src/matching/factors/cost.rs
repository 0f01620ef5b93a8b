use bumpalo::Bump;
use libforgelink_macros::scoring_factor;

use crate::{
  matching::{Factor, ScoringContext, thresholds::*},
  model::{ManufacturerProfile, Order},
};

#[scoring_factor(CostEfficiency, name = "cost_efficiency", weight = 8.0)]
fn score(&self, _bump: &Bump, order: &Order, candidate: &ManufacturerProfile, ctx: &ScoringContext) -> f64 {
  let Some(budget) = &order.budget else {
    return DEFAULT_COST_POINTS;
  };

  let midpoint = budget.midpoint();

  if ctx.quotes.is_empty() || midpoint <= 0.0 {
    return DEFAULT_COST_POINTS;
  }

  let average = ctx.quotes.iter().sum::<f64>() / ctx.quotes.len() as f64;
  let ratio = average / midpoint;

  if ratio <= 0.8 {
    COST_WEIGHT
  } else if ratio <= 1.0 {
    6.0
  } else if ratio <= 1.3 {
    4.0
  } else {
    1.0
  }
}

#[cfg(test)]
mod tests {
  use bumpalo::Bump;
  use jiff::Timestamp;

  use crate::{
    matching::{Factor, ScoringContext},
    model::{ManufacturerProfile, Order},
  };

  fn score(order: &Order, quotes: &[f64]) -> f64 {
    let candidate = ManufacturerProfile::builder("Shop").build();
    let ctx = ScoringContext { now: Timestamp::now(), quotes };

    super::CostEfficiency.score(&Bump::new(), order, &candidate, &ctx)
  }

  #[test]
  fn quotes_well_under_budget_score_the_full_budget() {
    let order = Order::builder("CNC Machining").budget((1_000.0, 3_000.0)).build();

    assert_eq!(score(&order, &[1_500.0, 1_600.0]), 8.0);
  }

  #[test]
  fn quotes_exactly_at_the_midpoint_score_the_within_budget_tier() {
    let order = Order::builder("CNC Machining").budget((1_000.0, 3_000.0)).build();

    assert_eq!(score(&order, &[2_000.0]), 6.0);
  }

  #[test]
  fn quotes_moderately_over_budget_drop_a_tier() {
    let order = Order::builder("CNC Machining").budget((1_000.0, 3_000.0)).build();

    assert_eq!(score(&order, &[2_500.0]), 4.0);
  }

  #[test]
  fn quotes_far_over_budget_score_the_floor() {
    let order = Order::builder("CNC Machining").budget((1_000.0, 3_000.0)).build();

    assert_eq!(score(&order, &[9_000.0]), 1.0);
  }

  #[test]
  fn missing_history_or_budget_scores_the_neutral_default() {
    let with_budget = Order::builder("CNC Machining").budget((1_000.0, 3_000.0)).build();
    let without_budget = Order::builder("CNC Machining").build();

    assert_eq!(score(&with_budget, &[]), 6.0);
    assert_eq!(score(&without_budget, &[2_000.0]), 6.0);
  }
}
