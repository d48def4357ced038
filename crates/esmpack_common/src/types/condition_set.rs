use esmpack_utils::indexmap::FxIndexSet;

/// Condition names active for one resolution, e.g. `import`, `node`.
///
/// `default` matches whether or not it was added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionSet(FxIndexSet<String>);

impl ConditionSet {
  pub fn matches(&self, condition: &str) -> bool {
    condition == "default" || self.0.contains(condition)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }
}

impl<S: Into<String>> FromIterator<S> for ConditionSet {
  fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
    Self(iter.into_iter().map(Into::into).collect())
  }
}

#[test]
fn test_condition_set_keeps_first_occurrence_order() {
  let conditions = ConditionSet::from_iter(["import", "node", "import", "custom"]);
  assert_eq!(conditions.iter().collect::<Vec<_>>(), ["import", "node", "custom"]);
  assert!(conditions.matches("node"));
  assert!(conditions.matches("default"));
  assert!(!conditions.matches("require"));
}
