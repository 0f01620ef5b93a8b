use any_ascii::any_ascii;
use bumpalo::{
  Bump,
  collections::{CollectIn, Vec},
};
use strsim::normalized_levenshtein;

/// Lowercased ASCII form with punctuation folded to spaces. All similarity
/// ratios operate on this canonical form.
pub(crate) fn canonical(value: &str) -> String {
  let folded = any_ascii(value)
    .to_lowercase()
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
    .collect::<String>();

  folded.split_whitespace().collect::<std::vec::Vec<_>>().join(" ")
}

/// Token-sort similarity ratio on a 0-100 scale. Word order is irrelevant:
/// "CNC Machining" and "machining, CNC" compare at 100.
pub(crate) fn token_sort_ratio(bump: &Bump, lhs: &str, rhs: &str) -> f64 {
  let (lhs, rhs) = (canonical(lhs), canonical(rhs));

  let mut lhs_tokens = lhs.split_whitespace().collect_in::<Vec<_>>(bump);
  let mut rhs_tokens = rhs.split_whitespace().collect_in::<Vec<_>>(bump);

  if lhs_tokens.is_empty() || rhs_tokens.is_empty() {
    return 0.0;
  }

  lhs_tokens.sort_unstable();
  rhs_tokens.sort_unstable();

  let lhs_sorted = lhs_tokens.join(" ");
  let rhs_sorted = rhs_tokens.join(" ");

  if lhs_sorted == rhs_sorted {
    return 100.0;
  }

  normalized_levenshtein(&lhs_sorted, &rhs_sorted) * 100.0
}

/// Best similarity between a window of the longer string and the whole of the
/// shorter one, 0-100. Substring containment scores 100, so
/// "ISO 9001" matches "ISO 9001:2015 certified".
pub(crate) fn partial_ratio(lhs: &str, rhs: &str) -> f64 {
  let (lhs, rhs) = (canonical(lhs), canonical(rhs));

  if lhs.is_empty() || rhs.is_empty() {
    return 0.0;
  }

  let (needle, hay) = if lhs.len() <= rhs.len() { (lhs, rhs) } else { (rhs, lhs) };

  // Containment is checked with and without spacing so "AS-9100D" still
  // covers "AS9100".
  if hay.contains(&needle) || hay.replace(' ', "").contains(&needle.replace(' ', "")) {
    return 100.0;
  }

  let hay_chars = hay.chars().collect::<std::vec::Vec<_>>();
  let window = needle.chars().count().min(hay_chars.len());

  hay_chars
    .windows(window)
    .map(|slice| normalized_levenshtein(&slice.iter().collect::<String>(), &needle) * 100.0)
    .fold(0.0, f64::max)
}

/// Best token-sort ratio of `needle` against every entry of `haystack`.
pub(crate) fn best_token_sort(bump: &Bump, needle: &str, haystack: &[String]) -> f64 {
  haystack.iter().map(|candidate| token_sort_ratio(bump, needle, candidate)).fold(0.0, f64::max)
}
