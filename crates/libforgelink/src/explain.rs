use crate::{
  matching::thresholds::*,
  model::{ManufacturerProfile, MatchScoreBreakdown},
};

const MAX_STRENGTHS: usize = 5;
const MAX_CONCERNS: usize = 4;

pub(crate) struct Explanation {
  pub strengths: Vec<String>,
  pub concerns: Vec<String>,
  pub confidence: f64,
  pub recommendation: String,
}

/// Turns a score breakdown into the human-readable rationale carried on every
/// match: thresholded strength and concern strings, a blended confidence
/// level, and a one-sentence recommendation.
pub(crate) fn explain(breakdown: &MatchScoreBreakdown, candidate: &ManufacturerProfile) -> Explanation {
  Explanation {
    strengths: strengths(breakdown),
    concerns: concerns(breakdown),
    confidence: confidence(breakdown, candidate),
    recommendation: recommendation(breakdown),
  }
}

fn fractions(breakdown: &MatchScoreBreakdown) -> [(&'static str, f64); 6] {
  [
    ("capability alignment", breakdown.capability / CAPABILITY_WEIGHT),
    ("delivery performance", breakdown.performance / PERFORMANCE_WEIGHT),
    ("quality ratings", breakdown.quality / QUALITY_WEIGHT),
    ("geographic proximity", breakdown.proximity / PROXIMITY_WEIGHT),
    ("cost efficiency", breakdown.cost / COST_WEIGHT),
    ("production availability", breakdown.availability / AVAILABILITY_WEIGHT),
  ]
}

fn strengths(breakdown: &MatchScoreBreakdown) -> Vec<String> {
  let [capability, performance, quality, proximity, cost, availability] = fractions(breakdown).map(|(_, fraction)| fraction);
  let mut strengths = Vec::new();

  let mut push = |message: &str| {
    if strengths.len() < MAX_STRENGTHS && !strengths.iter().any(|existing| existing == message) {
      strengths.push(message.to_string());
    }
  };

  if capability >= 0.9 {
    push("Exceptional capability match for the required processes");
  } else if capability >= 0.7 {
    push("Strong capability match for the required processes");
  }

  if performance >= 0.8 {
    push("Proven on-time delivery record");
  }

  if quality >= 0.8 {
    push("Excellent quality ratings and certifications");
  }

  if proximity >= 1.0 {
    push("Production close to the requested location");
  }

  if cost >= 0.75 {
    push("Competitive pricing within the stated budget");
  }

  if availability >= 0.8 {
    push("Short production lead time");
  }

  strengths
}

fn concerns(breakdown: &MatchScoreBreakdown) -> Vec<String> {
  let [capability, performance, quality, proximity, cost, availability] = fractions(breakdown).map(|(_, fraction)| fraction);
  let mut concerns = Vec::new();

  let mut push = |message: &str| {
    if concerns.len() < MAX_CONCERNS && !concerns.iter().any(|existing| existing == message) {
      concerns.push(message.to_string());
    }
  };

  if capability < 0.45 {
    push("Limited process alignment with the order requirements");
  }

  if performance < 0.4 {
    push("Thin delivery track record");
  }

  if quality < 0.4 {
    push("Quality ratings below the marketplace average");
  }

  if cost < 0.5 {
    push("Premium pricing relative to the stated budget");
  }

  if availability <= 0.4 {
    push("Long production lead time for this timeline");
  }

  if proximity <= PROXIMITY_OVERSEAS_POINTS / PROXIMITY_WEIGHT {
    push("Production located far from the requested region");
  }

  concerns
}

/// Blends data completeness, score consistency across factors and overall
/// score strength. Clamped so a recommendation never claims certainty.
fn confidence(breakdown: &MatchScoreBreakdown, candidate: &ManufacturerProfile) -> f64 {
  let completeness = data_completeness(candidate);

  let fractions = fractions(breakdown).map(|(_, fraction)| fraction);
  let mean = fractions.iter().sum::<f64>() / fractions.len() as f64;
  let variance = fractions.iter().map(|fraction| (fraction - mean).powi(2)).sum::<f64>() / fractions.len() as f64;
  let consistency = (1.0 - variance).max(0.5);

  let strength = breakdown.total_score / 100.0;

  ((completeness + consistency + strength) / 3.0).min(CONFIDENCE_CEILING)
}

fn data_completeness(candidate: &ManufacturerProfile) -> f64 {
  let populated = [
    candidate.stats.overall_rating.is_some(),
    candidate.stats.quality_rating.is_some(),
    candidate.stats.on_time_rate.is_some(),
    candidate.stats.avg_response_hours.is_some(),
    candidate.stats.completed_orders > 0,
    candidate.location.is_some(),
    !candidate.capabilities.processes.is_empty(),
    !candidate.recent_quotes.is_empty(),
  ];

  populated.iter().filter(|present| **present).count() as f64 / populated.len() as f64
}

fn recommendation(breakdown: &MatchScoreBreakdown) -> String {
  let (leader, _) = fractions(breakdown).into_iter().fold(("capability alignment", f64::MIN), |best, (label, fraction)| if fraction > best.1 { (label, fraction) } else { best });

  let total = breakdown.total_score;

  let phrase = if total >= 85.0 {
    "Excellent match"
  } else if total >= 75.0 {
    "Very good match"
  } else if total >= 65.0 {
    "Good match"
  } else {
    "Potential match"
  };

  format!("{phrase} at {total:.1}/100, led by {leader}")
}
