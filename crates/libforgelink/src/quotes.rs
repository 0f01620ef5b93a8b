use std::{collections::HashMap, sync::Arc};

use jiff::Timestamp;
use uuid::Uuid;

use crate::{error::MatchError, model::ManufacturerProfile};

/// External lookup of a manufacturer's historical price points. Implementors
/// return prices newest first; the engine windows and caps them.
#[allow(async_fn_in_trait)]
pub trait QuoteHistory: Clone + Send + Sync + 'static {
  fn recent_quotes(&self, manufacturer_id: Uuid, since: Timestamp) -> impl Future<Output = Result<Vec<f64>, MatchError>> + Send;
}

/// Serves quote history straight from the profiles' own recorded quotes, the
/// default when no dedicated quote store is wired in.
#[derive(Clone, Debug, Default)]
pub struct ProfileQuotes {
  quotes: Arc<HashMap<Uuid, Vec<(Timestamp, f64)>>>,
}

impl ProfileQuotes {
  pub fn from_profiles(profiles: &[ManufacturerProfile]) -> ProfileQuotes {
    let mut quotes: HashMap<Uuid, Vec<(Timestamp, f64)>> = HashMap::new();

    for profile in profiles {
      let mut points = profile.recent_quotes.iter().map(|quote| (quote.quoted_at, quote.price)).collect::<Vec<_>>();

      points.sort_by(|lhs, rhs| rhs.0.cmp(&lhs.0));
      quotes.insert(profile.id, points);
    }

    ProfileQuotes { quotes: Arc::new(quotes) }
  }
}

impl QuoteHistory for ProfileQuotes {
  async fn recent_quotes(&self, manufacturer_id: Uuid, since: Timestamp) -> Result<Vec<f64>, MatchError> {
    let prices = self
      .quotes
      .get(&manufacturer_id)
      .map(|points| points.iter().filter(|(quoted_at, _)| *quoted_at >= since).map(|(_, price)| *price).collect())
      .unwrap_or_default();

    Ok(prices)
  }
}

/// A quote collaborator that is down. Used to exercise the fallback path.
#[derive(Clone, Debug, Default)]
pub struct UnavailableQuotes;

impl QuoteHistory for UnavailableQuotes {
  async fn recent_quotes(&self, _: Uuid, _: Timestamp) -> Result<Vec<f64>, MatchError> {
    Err(MatchError::QuoteLookup("quote store unreachable".into()))
  }
}
