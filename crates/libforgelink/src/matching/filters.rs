use bumpalo::Bump;

use crate::{
  matching::{comparers, thresholds::PREFILTER_PROCESS_SIMILARITY},
  model::{ManufacturerProfile, Order},
};

/// Narrows the pool to candidates worth scoring: eligibility flags first,
/// then a coarse process-compatibility check. Candidates with no declared
/// capabilities are kept and scored neutrally later; missing data is never
/// grounds for exclusion.
pub fn filter_candidates(bump: &Bump, pool: Vec<ManufacturerProfile>, order: &Order) -> Vec<ManufacturerProfile> {
  pool
    .into_iter()
    .filter(|candidate| {
      if !candidate.active || !candidate.verified || !candidate.onboarded {
        tracing::debug!(manufacturer_id = %candidate.id, "excluded ineligible candidate");

        return false;
      }

      if candidate.capabilities.processes.is_empty() {
        return true;
      }

      let best = order
        .requirements
        .processes
        .iter()
        .map(|process| comparers::best_token_sort(bump, process, &candidate.capabilities.processes))
        .fold(0.0, f64::max);

      if best < PREFILTER_PROCESS_SIMILARITY {
        tracing::debug!(manufacturer_id = %candidate.id, similarity = best, "excluded process-incompatible candidate");

        return false;
      }

      true
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use bumpalo::Bump;

  use crate::model::{ManufacturerProfile, Order};

  #[test]
  fn ineligible_candidates_are_dropped() {
    let order = Order::builder("CNC Machining").build();
    let pool = vec![
      ManufacturerProfile::builder("Inactive").active(false).processes(&["CNC Machining"]).build(),
      ManufacturerProfile::builder("Unverified").verified(false).processes(&["CNC Machining"]).build(),
      ManufacturerProfile::builder("Onboarding").onboarded(false).processes(&["CNC Machining"]).build(),
      ManufacturerProfile::builder("Eligible").processes(&["CNC Machining"]).build(),
    ];

    let kept = super::filter_candidates(&Bump::new(), pool, &order);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "Eligible");
  }

  #[test]
  fn missing_capabilities_are_kept_for_neutral_scoring() {
    let order = Order::builder("CNC Machining").build();
    let pool = vec![ManufacturerProfile::builder("Undeclared").build()];

    assert_eq!(super::filter_candidates(&Bump::new(), pool, &order).len(), 1);
  }

  #[test]
  fn process_incompatible_candidates_are_dropped() {
    let order = Order::builder("Injection Molding").build();
    let pool = vec![
      ManufacturerProfile::builder("Molder").processes(&["Plastic Injection Molding"]).build(),
      ManufacturerProfile::builder("Forge").processes(&["Open Die Forging"]).build(),
    ];

    let kept = super::filter_candidates(&Bump::new(), pool, &order);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "Molder");
  }
}
