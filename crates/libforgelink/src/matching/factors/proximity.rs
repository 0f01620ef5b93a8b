use bumpalo::Bump;
use libforgelink_macros::scoring_factor;

use crate::{
  matching::{Factor, ScoringContext, comparers, thresholds::*},
  model::{ManufacturerProfile, Order},
};

/// Simplified country table: (alias, canonical, continent). Free-text country
/// fields are folded through `canonical` before lookup.
static COUNTRIES: &[(&str, &str, &str)] = &[
  ("united states", "us", "north-america"),
  ("united states of america", "us", "north-america"),
  ("usa", "us", "north-america"),
  ("us", "us", "north-america"),
  ("canada", "ca", "north-america"),
  ("mexico", "mx", "north-america"),
  ("brazil", "br", "south-america"),
  ("argentina", "ar", "south-america"),
  ("chile", "cl", "south-america"),
  ("colombia", "co", "south-america"),
  ("germany", "de", "europe"),
  ("france", "fr", "europe"),
  ("united kingdom", "gb", "europe"),
  ("uk", "gb", "europe"),
  ("great britain", "gb", "europe"),
  ("italy", "it", "europe"),
  ("spain", "es", "europe"),
  ("poland", "pl", "europe"),
  ("netherlands", "nl", "europe"),
  ("sweden", "se", "europe"),
  ("switzerland", "ch", "europe"),
  ("austria", "at", "europe"),
  ("czech republic", "cz", "europe"),
  ("czechia", "cz", "europe"),
  ("portugal", "pt", "europe"),
  ("turkey", "tr", "asia"),
  ("israel", "il", "asia"),
  ("united arab emirates", "ae", "asia"),
  ("uae", "ae", "asia"),
  ("saudi arabia", "sa", "asia"),
  ("china", "cn", "asia"),
  ("india", "in", "asia"),
  ("japan", "jp", "asia"),
  ("south korea", "kr", "asia"),
  ("korea", "kr", "asia"),
  ("taiwan", "tw", "asia"),
  ("vietnam", "vn", "asia"),
  ("thailand", "th", "asia"),
  ("malaysia", "my", "asia"),
  ("singapore", "sg", "asia"),
  ("indonesia", "id", "asia"),
  ("philippines", "ph", "asia"),
  ("australia", "au", "oceania"),
  ("new zealand", "nz", "oceania"),
  ("south africa", "za", "africa"),
  ("egypt", "eg", "africa"),
  ("nigeria", "ng", "africa"),
  ("morocco", "ma", "africa"),
  ("kenya", "ke", "africa"),
];

#[scoring_factor(GeographicProximity, name = "geographic_proximity", weight = 12.0)]
fn score(&self, bump: &Bump, order: &Order, candidate: &ManufacturerProfile, _ctx: &ScoringContext) -> f64 {
  let Some(preference) = &order.location_preference else {
    return DEFAULT_PROXIMITY_POINTS;
  };

  let Some(location) = &candidate.location else {
    return DEFAULT_PROXIMITY_POINTS;
  };

  if let (Some(wanted), Some(city)) = (&preference.city, &location.city)
    && comparers::token_sort_ratio(bump, wanted, city) >= LOCATION_MATCH_THRESHOLD
  {
    return PROXIMITY_WEIGHT;
  }

  if let (Some(region), Some(city)) = (&preference.region, &location.city)
    && comparers::partial_ratio(region, city) >= LOCATION_MATCH_THRESHOLD
  {
    return PROXIMITY_WEIGHT;
  }

  if same_country(bump, &preference.country, &location.country) {
    return PROXIMITY_COUNTRY_POINTS;
  }

  match (continent_of(&preference.country), continent_of(&location.country)) {
    (Some(lhs), Some(rhs)) if lhs == rhs => PROXIMITY_CONTINENT_POINTS,
    _ => PROXIMITY_OVERSEAS_POINTS,
  }
}

fn same_country(bump: &Bump, lhs: &str, rhs: &str) -> bool {
  if comparers::token_sort_ratio(bump, lhs, rhs) >= LOCATION_MATCH_THRESHOLD {
    return true;
  }

  // Alias forms ("USA" vs "United States") defeat the fuzzy ratio.
  match (lookup(lhs), lookup(rhs)) {
    (Some((lhs, _)), Some((rhs, _))) => lhs == rhs,
    _ => false,
  }
}

fn continent_of(country: &str) -> Option<&'static str> {
  lookup(country).map(|(_, continent)| continent)
}

fn lookup(country: &str) -> Option<(&'static str, &'static str)> {
  let needle = comparers::canonical(country);

  COUNTRIES.iter().find(|(alias, _, _)| *alias == needle).map(|(_, canonical, continent)| (*canonical, *continent))
}
