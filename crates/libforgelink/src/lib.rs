mod cache;
mod complexity;
mod directory;
mod engine;
mod error;
mod explain;
mod fallback;
mod matching;
mod model;
mod quotes;
mod rules;

pub mod prelude {
  pub use crate::cache::{MemoryCache, RecommendationCache};
  pub use crate::complexity::{analyze_complexity, recommended_options};
  pub use crate::directory::{InMemoryDirectory, ManufacturerDirectory};
  pub use crate::engine::Forgelink;
  pub use crate::error::MatchError;
  pub use crate::fallback::rank_heuristic;
  pub use crate::matching::{MatchParams, filters::filter_candidates, thresholds};
  pub use crate::model::{
    BudgetRange, Capabilities, ComplexityAnalysis, ComplexityLevel, CostEstimate, LocationPreference, ManufacturerMatch, ManufacturerProfile, MatchOutcome, MatchScoreBreakdown, Order,
    OrderRequirements, PerformanceStats, QuotePoint, RecommendationSource, SiteLocation,
  };
  pub use crate::quotes::{ProfileQuotes, QuoteHistory, UnavailableQuotes};
  pub use crate::rules::{GateOutcome, apply_rules};
}
