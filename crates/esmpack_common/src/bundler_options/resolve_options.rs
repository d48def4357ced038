use crate::{ConditionSet, Platform};

#[derive(Debug, Default, Clone)]
pub struct ResolveOptions {
  pub platform: Platform,
  pub conditions: Vec<String>,
}

impl ResolveOptions {
  /// `import`, then the platform condition, then user conditions, without duplicates. `default`
  /// is never listed since it always matches.
  pub fn condition_set(&self) -> ConditionSet {
    std::iter::once("import")
      .chain(self.platform.condition())
      .chain(self.conditions.iter().map(String::as_str))
      .filter(|condition| *condition != "default")
      .collect()
  }
}

#[test]
fn test_condition_set() {
  let options = ResolveOptions::default();
  assert_eq!(options.condition_set().iter().collect::<Vec<_>>(), ["import", "node"]);

  let options = ResolveOptions {
    platform: Platform::Browser,
    conditions: vec!["development".into(), "import".into(), "default".into()],
  };
  assert_eq!(
    options.condition_set().iter().collect::<Vec<_>>(),
    ["import", "browser", "development"]
  );

  let options = ResolveOptions { platform: Platform::Neutral, conditions: vec![] };
  assert_eq!(options.condition_set().iter().collect::<Vec<_>>(), ["import"]);
}
