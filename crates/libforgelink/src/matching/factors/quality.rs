use bumpalo::Bump;
use libforgelink_macros::scoring_factor;

use crate::{
  matching::{Factor, ScoringContext, comparers, thresholds::*},
  model::{ManufacturerProfile, Order},
};

/// Certifications that earn a quality bonus when declared.
pub(crate) const QUALITY_CERTIFICATIONS: [&str; 4] = ["ISO 9001", "AS9100", "ISO 14001", "IATF 16949"];

#[scoring_factor(QualityMetrics, name = "quality_metrics", weight = 15.0)]
fn score(&self, _bump: &Bump, _order: &Order, candidate: &ManufacturerProfile, _ctx: &ScoringContext) -> f64 {
  let stats = &candidate.stats;

  let mut signals = Vec::with_capacity(2);

  if let Some(rating) = stats.quality_rating {
    signals.push((rating * 2.0).clamp(0.0, 10.0));
  }
  if let Some(rating) = stats.overall_rating {
    signals.push((rating * 2.0).clamp(0.0, 10.0));
  }

  let base = if signals.is_empty() {
    // Unrated shops with volume get the benefit of the doubt.
    if stats.completed_orders >= 20 { 7.5 } else { 6.5 }
  } else {
    signals.iter().sum::<f64>() / signals.len() as f64
  };

  let graded = (base + certification_bonus(&candidate.capabilities.certifications)).min(10.0);

  if graded >= 9.5 {
    QUALITY_WEIGHT
  } else if graded >= 8.5 {
    12.0
  } else if graded >= 7.0 {
    8.0
  } else {
    3.0
  }
}

fn certification_bonus(declared: &[String]) -> f64 {
  let recognized = QUALITY_CERTIFICATIONS
    .iter()
    .filter(|certification| declared.iter().any(|held| comparers::partial_ratio(certification, held) >= CERTIFICATION_MATCH_THRESHOLD))
    .count();

  (recognized as f64 * CERTIFICATION_BONUS).min(CERTIFICATION_BONUS_CAP)
}
