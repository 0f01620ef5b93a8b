use std::time::Instant;

use bumpalo::Bump;
use itertools::Itertools;
use jiff::{SignedDuration, Timestamp};
use metrics::histogram;
use tracing::instrument;

use crate::{
  complexity::{analyze_complexity, recommended_options},
  directory::ManufacturerDirectory,
  error::MatchError,
  explain::explain,
  matching::{self, MatchParams, ScoringContext, factors::availability::effective_lead_days, filters::filter_candidates, thresholds::*},
  model::{CostEstimate, ManufacturerMatch, ManufacturerProfile, MatchOutcome, Order, RecommendationSource},
  quotes::QuoteHistory,
  rules::apply_rules,
};

/// The main entrypoint for using the forgelink library.
///
/// `Forgelink` ranks a pool of manufacturers against a manufacturing order
/// with a deterministic, explainable multi-factor score. It is generic over
/// its two collaborators: a [`ManufacturerDirectory`] serving candidate
/// profiles and a [`QuoteHistory`] serving historical price points.
///
/// This struct can be safely cloned and sent across thread boundaries; it
/// holds no mutable state and every ranking run works on a fresh snapshot.
///
/// # Examples
///
/// ```rust
/// # use libforgelink::prelude::*;
/// # tokio_test::block_on(async {
/// let pool = vec![
///   ManufacturerProfile::builder("Acme Precision")
///     .processes(&["CNC Machining"])
///     .completed_orders(40)
///     .overall_rating(4.8)
///     .build(),
/// ];
///
/// let quotes = ProfileQuotes::from_profiles(&pool);
/// let engine = Forgelink::new(InMemoryDirectory::with_profiles(pool), quotes);
///
/// let order = Order::builder("CNC Machining").budget((1_000.0, 3_000.0)).build();
/// let outcome = engine.rank_manufacturers(&order, &MatchParams::default()).await.unwrap();
///
/// for candidate in &outcome.top_matches {
///   println!("#{} {}: {:.1}", candidate.rank, candidate.manufacturer_name, candidate.breakdown.total_score);
/// }
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Forgelink<D: ManufacturerDirectory, Q: QuoteHistory> {
  directory: D,
  quotes: Q,
}

impl<D: ManufacturerDirectory, Q: QuoteHistory> Forgelink<D, Q> {
  pub fn new(directory: D, quotes: Q) -> Forgelink<D, Q> {
    Forgelink { directory, quotes }
  }

  /// Retrieve the backing directory availability.
  pub async fn health(&self) -> Result<bool, MatchError> {
    self.directory.health().await
  }

  /// Rank the directory's candidates against `order`, pinned to the current
  /// wall clock.
  pub async fn rank_manufacturers(&self, order: &Order, params: &MatchParams) -> Result<MatchOutcome, MatchError> {
    self.rank_at(order, params, Timestamp::now()).await
  }

  /// Same as [`Self::rank_manufacturers`] with an explicit clock: identical
  /// inputs produce identical output, ranks included.
  #[instrument(name = "rank_manufacturers", skip_all, fields(order_id = %order.id))]
  pub async fn rank_at(&self, order: &Order, params: &MatchParams, now: Timestamp) -> Result<MatchOutcome, MatchError> {
    order.validate_at(now)?;

    let complexity = analyze_complexity(order, now);
    let pool = self.directory.candidates(order).await?;
    let pool_size = pool.len();

    let mut bump = Bump::with_capacity(1024);
    let candidates = filter_candidates(&bump, pool, order);
    let eligible = candidates.len();

    tracing::debug!(pool = pool_size, eligible, "filtered candidate pool");

    let since = now.saturating_sub(SignedDuration::from_hours(24 * QUOTE_WINDOW_DAYS)).unwrap();
    let then = Instant::now();

    let mut matches = Vec::with_capacity(eligible);
    let mut quote_failures = 0usize;

    for candidate in candidates {
      let quotes = match self.quotes.recent_quotes(candidate.id, since).await {
        Ok(mut prices) => {
          prices.truncate(QUOTE_SAMPLE_LIMIT);
          prices
        }

        Err(err) => {
          quote_failures += 1;
          tracing::warn!(manufacturer_id = %candidate.id, error = err.to_string(), "quote lookup failed, scoring with neutral cost");

          Vec::new()
        }
      };

      let ctx = ScoringContext { now, quotes: &quotes };
      let mut breakdown = matching::score_candidate(&bump, order, &candidate, &ctx);
      breakdown.complexity_adjusted_score = Some(matching::complexity_adjusted(&breakdown, &complexity));

      bump.reset();

      tracing::debug!(manufacturer_id = %candidate.id, score = breakdown.total_score, "computed score");

      histogram!("forgelink_scoring_scores").record(breakdown.total_score);

      let explanation = explain(&breakdown, &candidate);

      matches.push(ManufacturerMatch {
        manufacturer_id: candidate.id,
        manufacturer_name: candidate.name.clone(),
        rank: 0,
        strengths: explanation.strengths,
        concerns: explanation.concerns,
        confidence: explanation.confidence,
        estimated_cost: estimate_cost(&quotes, order),
        estimated_timeline_days: estimate_timeline_days(&candidate),
        recommendation: explanation.recommendation,
        breakdown,
      });
    }

    histogram!("forgelink_scoring_latency_seconds").record(then.elapsed().as_secs_f64());

    // One dead record must not abort the run, but a collaborator that is down
    // across the board is the caller's cue to switch to the fallback source.
    if eligible > 0 && quote_failures == eligible {
      return Err(MatchError::QuoteLookup("every quote lookup failed".into()));
    }

    let limit = params.max_recommendations.unwrap_or_else(|| recommended_options(&complexity));
    let gate = apply_rules(matches, params.min_score_floor, limit);
    let mut top_matches = gate.matches;

    if let Some(boost) = params.urgency_boost {
      apply_urgency_boost(&mut top_matches, boost);
    }

    let market_insights = market_insights(order, pool_size, &top_matches, gate.backfilled);

    Ok(MatchOutcome {
      order_id: order.id,
      top_matches,
      qualified_matches: gate.qualified,
      backfilled: gate.backfilled,
      source: RecommendationSource::FullEngine,
      complexity,
      market_insights,
    })
  }
}

/// Lifts the sort key of fast-delivery matches, then re-sorts (stable) and
/// reassigns ranks. The audited `total_score` is never touched.
fn apply_urgency_boost(matches: &mut [ManufacturerMatch], boost: f64) {
  let boost = boost.clamp(URGENCY_BOOST_MIN, URGENCY_BOOST_MAX);

  matches.sort_by(|lhs, rhs| boosted_key(rhs, boost).total_cmp(&boosted_key(lhs, boost)));

  for (position, candidate) in matches.iter_mut().enumerate() {
    candidate.rank = position + 1;
  }
}

fn boosted_key(candidate: &ManufacturerMatch, boost: f64) -> f64 {
  if candidate.breakdown.availability >= URGENCY_AVAILABILITY_THRESHOLD {
    candidate.breakdown.total_score * boost
  } else {
    candidate.breakdown.total_score
  }
}

fn estimate_cost(quotes: &[f64], order: &Order) -> Option<CostEstimate> {
  if !quotes.is_empty() {
    let average = quotes.iter().sum::<f64>() / quotes.len() as f64;

    return Some(CostEstimate { low: average * 0.85, high: average * 1.15 });
  }

  order.budget.map(|budget| CostEstimate { low: budget.min, high: budget.max })
}

pub(crate) fn market_insights(order: &Order, pool_size: usize, matches: &[ManufacturerMatch], backfilled: bool) -> Option<String> {
  if matches.is_empty() {
    let mut suggestions = vec!["broadening the required manufacturing processes"];

    if order.location_preference.is_some() {
      suggestions.push("expanding the geographic search area");
    }

    if order.budget.is_some() {
      suggestions.push("adjusting the budget range");
    }

    suggestions.push("relaxing the delivery timeline");

    return Some(format!("No manufacturers out of a pool of {pool_size} matched this order. Consider {}.", suggestions.iter().join(", ")));
  }

  if backfilled {
    return Some(format!(
      "Fewer than {MIN_QUALIFIED_MATCHES} manufacturers fully qualified for this order; lower-scoring options were included to round out the list."
    ));
  }

  None
}

pub(crate) fn estimate_timeline_days(candidate: &ManufacturerProfile) -> u32 {
  effective_lead_days(candidate).ceil() as u32
}
