use jiff::Timestamp;

use crate::{
  matching::comparers,
  model::{ComplexityAnalysis, ComplexityLevel, Order},
};

/// Dimension weights. Quality standards fold into the precision and custom
/// dimensions, so these sum to 0.90; the composite divides by that sum to
/// keep the full 0-10 scale reachable.
const PROCESS_WEIGHT: f64 = 0.25;
const MATERIAL_WEIGHT: f64 = 0.20;
const PRECISION_WEIGHT: f64 = 0.20;
const TIMELINE_WEIGHT: f64 = 0.15;
const CUSTOM_WEIGHT: f64 = 0.10;
const WEIGHT_SUM: f64 = PROCESS_WEIGHT + MATERIAL_WEIGHT + PRECISION_WEIGHT + TIMELINE_WEIGHT + CUSTOM_WEIGHT;

/// Process count at which the process dimension saturates.
const PROCESS_COUNT_CEILING: f64 = 5.0;

static EXOTIC_MATERIALS: &[&str] = &["titanium", "inconel", "hastelloy", "tungsten", "zirconium", "magnesium", "peek", "carbon fiber"];
static HARDENED_MATERIALS: &[&str] = &["tool steel", "hardened", "h13", "d2", "4140"];
static ENGINEERING_MATERIALS: &[&str] = &["stainless", "aluminum", "aluminium", "brass", "copper"];
static COMMODITY_MATERIALS: &[&str] = &["mild steel", "abs", "nylon", "pla", "polycarbonate"];

/// Scores how hard an order is to manufacture, on a 0-10 scale, with the
/// sub-dimension scores and human-readable contributors preserved for the
/// response. Pure: same order and clock, same analysis.
pub fn analyze_complexity(order: &Order, now: Timestamp) -> ComplexityAnalysis {
  let requirements = &order.requirements;
  let mut factors = Vec::new();

  let distinct = distinct_processes(&requirements.processes);
  let process = (distinct as f64 / PROCESS_COUNT_CEILING).min(1.0);

  if distinct > 1 {
    factors.push(format!("{distinct} distinct manufacturing processes required"));
  }

  let material = requirements.materials.iter().map(|material| material_tier(material, &mut factors)).fold(if requirements.materials.is_empty() { 0.2 } else { 0.0 }, f64::max);

  let precision = match requirements.tolerance_mm {
    Some(tolerance) if tolerance <= 0.005 => 1.0,
    Some(tolerance) if tolerance <= 0.01 => 0.85,
    Some(tolerance) if tolerance <= 0.05 => 0.6,
    Some(tolerance) if tolerance <= 0.1 => 0.4,
    Some(_) => 0.2,
    None => 0.3,
  };

  if let Some(tolerance) = requirements.tolerance_mm
    && tolerance <= 0.01
  {
    factors.push(format!("tight tolerance of ±{tolerance}mm"));
  }

  let days_left = (order.delivery_deadline.as_second() - now.as_second()) as f64 / 86_400.0;
  let timeline = if days_left <= 7.0 {
    1.0
  } else if days_left <= 14.0 {
    0.8
  } else if days_left <= 30.0 {
    0.5
  } else if days_left <= 60.0 {
    0.3
  } else {
    0.1
  };

  if days_left <= 14.0 {
    factors.push(format!("compressed timeline of {} days", days_left.max(0.0).ceil() as i64));
  }

  let custom = (requirements.custom_requirements.len() as f64 * 0.35 + requirements.certifications.len() as f64 * 0.15).min(1.0);

  if !requirements.custom_requirements.is_empty() {
    factors.push(format!("{} custom requirements", requirements.custom_requirements.len()));
  }
  if !requirements.certifications.is_empty() {
    factors.push(format!("{} certification requirements", requirements.certifications.len()));
  }

  let weighted = PROCESS_WEIGHT * process + MATERIAL_WEIGHT * material + PRECISION_WEIGHT * precision + TIMELINE_WEIGHT * timeline + CUSTOM_WEIGHT * custom;
  let score = (10.0 * weighted / WEIGHT_SUM).clamp(0.0, 10.0);

  let level = if score <= 3.0 {
    ComplexityLevel::Simple
  } else if score <= 6.0 {
    ComplexityLevel::Moderate
  } else if score <= 8.0 {
    ComplexityLevel::High
  } else {
    ComplexityLevel::Critical
  };

  ComplexityAnalysis {
    score,
    level,
    process,
    material,
    precision,
    timeline,
    custom,
    factors,
  }
}

/// How many ranked options to present for an order of this difficulty.
pub fn recommended_options(analysis: &ComplexityAnalysis) -> usize {
  let base = match analysis.level {
    ComplexityLevel::Simple => 2,
    ComplexityLevel::Moderate => 3,
    ComplexityLevel::High => 4,
    ComplexityLevel::Critical => 4,
  };

  if analysis.level == ComplexityLevel::Critical && (analysis.timeline > 0.8 || analysis.precision > 0.8) {
    (base + 1).min(5)
  } else {
    base
  }
}

fn distinct_processes(processes: &[String]) -> usize {
  let mut seen = Vec::with_capacity(processes.len());

  for process in processes {
    let folded = comparers::canonical(process);

    if !folded.is_empty() && !seen.contains(&folded) {
      seen.push(folded);
    }
  }

  seen.len()
}

fn material_tier(material: &str, factors: &mut Vec<String>) -> f64 {
  let folded = comparers::canonical(material);

  if EXOTIC_MATERIALS.iter().any(|exotic| folded.contains(exotic)) {
    factors.push(format!("exotic material: {material}"));

    return 1.0;
  }

  if HARDENED_MATERIALS.iter().any(|hard| folded.contains(hard)) {
    return 0.7;
  }

  if ENGINEERING_MATERIALS.iter().any(|common| folded.contains(common)) {
    return 0.5;
  }

  if COMMODITY_MATERIALS.iter().any(|commodity| folded.contains(commodity)) {
    return 0.2;
  }

  0.4
}

#[cfg(test)]
mod tests {
  use jiff::{SignedDuration, Timestamp};

  use super::{analyze_complexity, recommended_options};
  use crate::model::{ComplexityLevel, Order};

  fn deadline_in(now: Timestamp, days: i64) -> Timestamp {
    now.saturating_add(SignedDuration::from_hours(24 * days)).unwrap()
  }

  #[test]
  fn five_process_titanium_rush_order_is_critical() {
    let now = Timestamp::now();
    let order = Order::builder("CNC Machining")
      .extra_processes(&["Wire EDM", "Anodizing", "Heat Treatment", "Surface Grinding"])
      .materials(&["titanium"])
      .tolerance_mm(0.005)
      .deadline(deadline_in(now, 5))
      .build();

    let analysis = analyze_complexity(&order, now);

    assert_eq!(analysis.level, ComplexityLevel::Critical);
    assert!(analysis.score > 8.0);
    assert!(!analysis.factors.is_empty());

    let options = recommended_options(&analysis);

    assert!(options == 4 || options == 5);
  }

  #[test]
  fn single_commodity_process_is_simple() {
    let now = Timestamp::now();
    let order = Order::builder("Laser Cutting").materials(&["mild steel"]).deadline(deadline_in(now, 90)).build();

    let analysis = analyze_complexity(&order, now);

    assert_eq!(analysis.level, ComplexityLevel::Simple);
    assert_eq!(recommended_options(&analysis), 2);
  }

  #[test]
  fn moderate_orders_recommend_three_options() {
    let now = Timestamp::now();
    let order = Order::builder("CNC Machining").extra_processes(&["Anodizing"]).materials(&["stainless 304"]).tolerance_mm(0.05).deadline(deadline_in(now, 25)).build();

    let analysis = analyze_complexity(&order, now);

    assert_eq!(analysis.level, ComplexityLevel::Moderate);
    assert_eq!(recommended_options(&analysis), 3);
  }

  #[test]
  fn duplicate_process_names_count_once() {
    let now = Timestamp::now();
    let order = Order::builder("CNC Machining").extra_processes(&["cnc machining", "CNC MACHINING"]).deadline(deadline_in(now, 90)).build();

    let analysis = analyze_complexity(&order, now);

    assert!(analysis.process <= 0.2 + f64::EPSILON);
  }

  #[test]
  fn sub_dimensions_stay_normalized() {
    let now = Timestamp::now();
    let order = Order::builder("CNC Machining")
      .extra_processes(&["a", "b", "c", "d", "e", "f", "g"])
      .materials(&["titanium", "inconel"])
      .tolerance_mm(0.001)
      .custom_requirements(&["laser etching", "custom packaging", "serialized parts", "first article inspection"])
      .certifications(&["AS9100", "ISO 9001"])
      .deadline(deadline_in(now, 2))
      .build();

    let analysis = analyze_complexity(&order, now);

    for dimension in [analysis.process, analysis.material, analysis.precision, analysis.timeline, analysis.custom] {
      assert!((0.0..=1.0).contains(&dimension));
    }

    assert!(analysis.score <= 10.0);
  }
}
