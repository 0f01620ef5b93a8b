use bon::bon;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::MatchError;

/// A manufacturing order as received from the marketplace. Field names are
/// part of the client contract and must not be renamed.
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct Order {
  pub id: Uuid,
  #[validate(nested)]
  pub requirements: OrderRequirements,
  pub quantity: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub budget: Option<BudgetRange>,
  pub delivery_deadline: Timestamp,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location_preference: Option<LocationPreference>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct OrderRequirements {
  /// Free-text manufacturing process names. The first entry is the primary
  /// process; all of them participate in matching.
  #[validate(length(min = 1, message = "at least one manufacturing process is required"))]
  pub processes: Vec<String>,
  #[serde(default)]
  pub materials: Vec<String>,
  #[serde(default)]
  pub certifications: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub industry: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tolerance_mm: Option<f64>,
  #[serde(default)]
  pub custom_requirements: Vec<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct BudgetRange {
  pub min: f64,
  pub max: f64,
}

impl BudgetRange {
  pub fn midpoint(&self) -> f64 {
    (self.min + self.max) / 2.0
  }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LocationPreference {
  pub country: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub region: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
}

impl Order {
  /// The single fail-fast path in the core. Everything else degrades to
  /// documented neutral defaults instead of raising.
  pub fn validate_at(&self, now: Timestamp) -> Result<(), MatchError> {
    if self.requirements.processes.iter().all(|p| p.trim().is_empty()) {
      return Err(MatchError::InvalidOrder("at least one manufacturing process is required".into()));
    }

    if let Some(budget) = &self.budget
      && budget.min > budget.max
    {
      return Err(MatchError::InvalidOrder(format!("budget minimum {} exceeds maximum {}", budget.min, budget.max)));
    }

    if self.delivery_deadline <= now {
      return Err(MatchError::InvalidOrder("delivery deadline has already passed".into()));
    }

    Ok(())
  }
}

#[bon]
impl Order {
  #[builder]
  pub fn builder(
    #[builder(start_fn)] process: &str,
    extra_processes: Option<&[&str]>,
    materials: Option<&[&str]>,
    certifications: Option<&[&str]>,
    industry: Option<&str>,
    tolerance_mm: Option<f64>,
    custom_requirements: Option<&[&str]>,
    #[builder(default = 1)] quantity: u32,
    budget: Option<(f64, f64)>,
    deadline: Option<Timestamp>,
    country: Option<&str>,
    region: Option<&str>,
    city: Option<&str>,
  ) -> Order {
    let mut processes = vec![process.to_string()];
    processes.extend(extra_processes.unwrap_or_default().iter().map(|p| p.to_string()));

    Order {
      id: Uuid::new_v4(),
      requirements: OrderRequirements {
        processes,
        materials: strings(materials),
        certifications: strings(certifications),
        industry: industry.map(ToOwned::to_owned),
        tolerance_mm,
        custom_requirements: strings(custom_requirements),
      },
      quantity,
      budget: budget.map(|(min, max)| BudgetRange { min, max }),
      delivery_deadline: deadline.unwrap_or_else(|| Timestamp::now().saturating_add(SignedDuration::from_hours(24 * 30)).unwrap()),
      location_preference: country.map(|country| LocationPreference {
        country: country.to_string(),
        region: region.map(ToOwned::to_owned),
        city: city.map(ToOwned::to_owned),
      }),
    }
  }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ManufacturerProfile {
  pub id: Uuid,
  pub name: String,
  pub active: bool,
  pub verified: bool,
  pub onboarded: bool,
  pub capabilities: Capabilities,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location: Option<SiteLocation>,
  pub stats: PerformanceStats,
  pub lead_time_days: u32,
  pub rush_capable: bool,
  #[serde(default)]
  pub recent_quotes: Vec<QuotePoint>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Capabilities {
  #[serde(default)]
  pub processes: Vec<String>,
  #[serde(default)]
  pub materials: Vec<String>,
  #[serde(default)]
  pub certifications: Vec<String>,
  #[serde(default)]
  pub industries: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SiteLocation {
  pub country: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub city: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lat: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lon: Option<f64>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PerformanceStats {
  pub completed_orders: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub overall_rating: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub quality_rating: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub on_time_rate: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub avg_response_hours: Option<f64>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct QuotePoint {
  pub price: f64,
  pub quoted_at: Timestamp,
}

#[bon]
impl ManufacturerProfile {
  #[builder]
  pub fn builder(
    #[builder(start_fn)] name: &str,
    id: Option<Uuid>,
    #[builder(default = true)] active: bool,
    #[builder(default = true)] verified: bool,
    #[builder(default = true)] onboarded: bool,
    processes: Option<&[&str]>,
    materials: Option<&[&str]>,
    certifications: Option<&[&str]>,
    industries: Option<&[&str]>,
    country: Option<&str>,
    city: Option<&str>,
    #[builder(default = 0)] completed_orders: u32,
    overall_rating: Option<f64>,
    quality_rating: Option<f64>,
    on_time_rate: Option<f64>,
    avg_response_hours: Option<f64>,
    #[builder(default = 10)] lead_time_days: u32,
    #[builder(default = false)] rush_capable: bool,
    recent_quotes: Option<Vec<QuotePoint>>,
  ) -> ManufacturerProfile {
    ManufacturerProfile {
      id: id.unwrap_or_else(Uuid::new_v4),
      name: name.to_string(),
      active,
      verified,
      onboarded,
      capabilities: Capabilities {
        processes: strings(processes),
        materials: strings(materials),
        certifications: strings(certifications),
        industries: strings(industries),
      },
      location: country.map(|country| SiteLocation {
        country: country.to_string(),
        city: city.map(ToOwned::to_owned),
        lat: None,
        lon: None,
      }),
      stats: PerformanceStats {
        completed_orders,
        overall_rating,
        quality_rating,
        on_time_rate,
        avg_response_hours,
      },
      lead_time_days,
      rush_capable,
      recent_quotes: recent_quotes.unwrap_or_default(),
    }
  }
}

fn strings(values: Option<&[&str]>) -> Vec<String> {
  values.unwrap_or_default().iter().map(|s| s.to_string()).collect()
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
  Simple,
  Moderate,
  High,
  Critical,
}

impl ComplexityLevel {
  pub fn as_str(&self) -> &'static str {
    match self {
      ComplexityLevel::Simple => "simple",
      ComplexityLevel::Moderate => "moderate",
      ComplexityLevel::High => "high",
      ComplexityLevel::Critical => "critical",
    }
  }
}

/// Derived per matching request from the order alone, then discarded.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ComplexityAnalysis {
  pub score: f64,
  pub level: ComplexityLevel,
  pub process: f64,
  pub material: f64,
  pub precision: f64,
  pub timeline: f64,
  pub custom: f64,
  pub factors: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct MatchScoreBreakdown {
  pub capability: f64,
  pub performance: f64,
  pub quality: f64,
  pub proximity: f64,
  pub cost: f64,
  pub availability: f64,
  pub total_score: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub complexity_adjusted_score: Option<f64>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct CostEstimate {
  pub low: f64,
  pub high: f64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ManufacturerMatch {
  pub manufacturer_id: Uuid,
  pub manufacturer_name: String,
  pub breakdown: MatchScoreBreakdown,
  /// 1-based, contiguous, reassigned on every re-sort.
  pub rank: usize,
  pub strengths: Vec<String>,
  pub concerns: Vec<String>,
  pub confidence: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub estimated_cost: Option<CostEstimate>,
  pub estimated_timeline_days: u32,
  pub recommendation: String,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum RecommendationSource {
  #[serde(rename = "full-engine")]
  FullEngine,
  #[serde(rename = "fallback-heuristic")]
  FallbackHeuristic,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MatchOutcome {
  pub order_id: Uuid,
  pub top_matches: Vec<ManufacturerMatch>,
  pub qualified_matches: usize,
  pub backfilled: bool,
  pub source: RecommendationSource,
  pub complexity: ComplexityAnalysis,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub market_insights: Option<String>,
}
