use bumpalo::Bump;
use libforgelink_macros::scoring_factor;

use crate::{
  matching::{Factor, ScoringContext, comparers, thresholds::*},
  model::{Capabilities, ManufacturerProfile, Order, OrderRequirements},
};

#[scoring_factor(CapabilityMatch, name = "capability_match", weight = 35.0)]
fn score(&self, bump: &Bump, order: &Order, candidate: &ManufacturerProfile, _ctx: &ScoringContext) -> f64 {
  let required = &order.requirements;
  let declared = &candidate.capabilities;

  if required.processes.is_empty() || declared.processes.is_empty() {
    return CAPABILITY_ADAPTABLE_POINTS;
  }

  let best = required.processes.iter().map(|process| comparers::best_token_sort(bump, process, &declared.processes)).fold(0.0, f64::max);

  let process_points = if best >= CAPABILITY_EXACT_MATCH_THRESHOLD {
    CAPABILITY_WEIGHT
  } else if best >= CAPABILITY_STRONG_MATCH_THRESHOLD {
    CAPABILITY_STRONG_POINTS
  } else if best >= CAPABILITY_PARTIAL_MATCH_THRESHOLD {
    CAPABILITY_PARTIAL_POINTS
  } else {
    0.0
  };

  let blended = CAPABILITY_PROCESS_SHARE * (process_points / CAPABILITY_WEIGHT) + CAPABILITY_MATERIAL_SHARE * material_share(bump, required, declared) + CAPABILITY_INDUSTRY_SHARE * industry_share(bump, required, declared);

  CAPABILITY_WEIGHT * blended
}

/// Fraction of required materials the candidate can work with. An order with
/// no material requirements has nothing to miss; a candidate with no declared
/// materials scores the neutral half.
fn material_share(bump: &Bump, required: &OrderRequirements, declared: &Capabilities) -> f64 {
  if required.materials.is_empty() {
    return 1.0;
  }

  if declared.materials.is_empty() {
    return 0.5;
  }

  let matched = required.materials.iter().filter(|material| comparers::best_token_sort(bump, material, &declared.materials) >= MATERIAL_MATCH_THRESHOLD).count();

  matched as f64 / required.materials.len() as f64
}

fn industry_share(bump: &Bump, required: &OrderRequirements, declared: &Capabilities) -> f64 {
  let Some(industry) = &required.industry else {
    return 1.0;
  };

  if declared.industries.is_empty() {
    return 0.5;
  }

  let best = comparers::best_token_sort(bump, industry, &declared.industries);

  if best >= INDUSTRY_STRONG_MATCH_THRESHOLD {
    1.0
  } else if best >= INDUSTRY_PARTIAL_MATCH_THRESHOLD {
    0.5
  } else {
    0.0
  }
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

  fn context() -> ScoringContext<'static> {
    ScoringContext { now: Timestamp::now(), quotes: &[] }
  }

  #[test]
  fn full_alignment_scores_the_whole_budget() {
    let order = Order::builder("CNC Machining").materials(&["6061 aluminum"]).industry("aerospace").build();
    let candidate = ManufacturerProfile::builder("Acme")
      .processes(&["machining, CNC", "Anodizing"])
      .materials(&["Aluminum 6061", "Stainless 304"])
      .industries(&["Aerospace"])
      .build();

    assert_approx_eq!(f64, super::CapabilityMatch.score(&Bump::new(), &order, &candidate, &context()), 35.0);
  }

  #[test]
  fn missing_capabilities_score_as_adaptable_not_zero() {
    let order = Order::builder("CNC Machining").build();
    let candidate = ManufacturerProfile::builder("Sparse").build();

    assert_approx_eq!(f64, super::CapabilityMatch.score(&Bump::new(), &order, &candidate, &context()), 15.0);
  }

  #[test]
  fn material_mismatch_costs_its_share() {
    let order = Order::builder("CNC Machining").materials(&["titanium"]).build();
    let candidate = ManufacturerProfile::builder("SteelShop").processes(&["CNC Machining"]).materials(&["mild steel"]).build();

    // Process slice and industry slice are full, material slice is zero.
    assert_approx_eq!(f64, super::CapabilityMatch.score(&Bump::new(), &order, &candidate, &context()), 35.0 * 0.75);
  }

  #[test]
  fn unrelated_process_scores_nothing_for_the_process_slice() {
    let order = Order::builder("Injection Molding").build();
    let candidate = ManufacturerProfile::builder("Forge").processes(&["Open Die Forging"]).materials(&["steel"]).build();

    let score = super::CapabilityMatch.score(&Bump::new(), &order, &candidate, &context());

    // Only the material (vacuous) and industry (vacuous) shares remain.
    assert_approx_eq!(f64, score, 35.0 * 0.40);
  }
}
