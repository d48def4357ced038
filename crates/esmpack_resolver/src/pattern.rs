use std::cmp::Ordering;

use esmpack_common::Target;
use esmpack_error::ResolveError;
use esmpack_utils::indexmap::FxIndexMap;

/// The `exports`/`imports` entry a key matched through a `*` pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'a> {
  pub target: &'a Target,
  /// The substring of the key that `*` stands for.
  pub captured: &'a str,
}

/// Orders pattern keys by specificity: the later the `*`, the more specific; on a tie the longer
/// key wins. Sorting with this comparator puts the most specific key first.
pub fn pattern_key_compare(a: &str, b: &str) -> Ordering {
  let base_a = a.find('*').map_or(a.len(), |i| i + 1);
  let base_b = b.find('*').map_or(b.len(), |i| i + 1);
  base_b.cmp(&base_a).then_with(|| b.len().cmp(&a.len()))
}

/// Matches `match_key` against the keys of `map` that contain a `*`.
///
/// Keys with more than one `*` are rejected even when they would not have matched.
pub fn match_pattern<'a>(
  match_key: &'a str,
  map: &'a FxIndexMap<String, Target>,
) -> Result<Option<PatternMatch<'a>>, ResolveError> {
  let mut candidates = Vec::new();
  for key in map.keys() {
    match key.matches('*').count() {
      0 => {}
      1 => candidates.push(key.as_str()),
      _ => {
        return Err(ResolveError::InvalidPackageConfiguration(format!(
          "{key:?} contains more than one \"*\""
        )));
      }
    }
  }
  candidates.sort_by(|a, b| pattern_key_compare(a, b));

  for candidate in candidates {
    let Some((prefix, trailer)) = candidate.split_once('*') else { continue };
    if match_key == prefix || !match_key.starts_with(prefix) {
      continue;
    }
    if !trailer.is_empty() && !(match_key.ends_with(trailer) && match_key.len() >= candidate.len())
    {
      continue;
    }
    let captured = &match_key[prefix.len()..match_key.len() - trailer.len()];
    return Ok(Some(PatternMatch { target: &map[candidate], captured }));
  }

  Ok(None)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn map(keys: &[&str]) -> FxIndexMap<String, Target> {
    keys.iter().map(|key| ((*key).to_string(), Target::Literal((*key).to_string()))).collect()
  }

  #[test]
  fn test_pattern_key_compare() {
    let mut keys = vec!["./*", "./features/*.js", "./features/*", "./features/x/*"];
    keys.sort_by(|a, b| pattern_key_compare(a, b));
    assert_eq!(keys, ["./features/x/*", "./features/*.js", "./features/*", "./*"]);
  }

  #[test]
  fn test_most_specific_key_wins() {
    let exports = map(&["./*", "./features/*.js", "./features/private/*"]);
    let found = match_pattern("./features/a.js", &exports).unwrap().unwrap();
    assert_eq!(found.target, &Target::Literal("./features/*.js".into()));
    assert_eq!(found.captured, "a");

    let found = match_pattern("./features/private/a.js", &exports).unwrap().unwrap();
    assert_eq!(found.target, &Target::Literal("./features/private/*".into()));
    assert_eq!(found.captured, "a.js");
  }

  #[test]
  fn test_no_match() {
    let exports = map(&["./features/*.js"]);
    assert!(match_pattern("./features/", &exports).unwrap().is_none());
    assert!(match_pattern("./features/a.cjs", &exports).unwrap().is_none());
    assert!(match_pattern("./other/a.js", &exports).unwrap().is_none());
  }

  #[test]
  fn test_trailer_may_not_overlap_prefix() {
    let exports = map(&["./a*a"]);
    assert!(match_pattern("./a", &exports).unwrap().is_none());
    assert!(match_pattern("./aa", &exports).unwrap().is_none());
    assert_eq!(match_pattern("./aba", &exports).unwrap().unwrap().captured, "b");
  }

  #[test]
  fn test_multiple_wildcards_are_rejected() {
    let exports = map(&["./a/*", "./*/*.js"]);
    let err = match_pattern("./a/b", &exports).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidPackageConfiguration(_)));
  }
}
