use esmpack_utils::indexmap::FxIndexMap;
use serde_json::Value;

/// One node of an `exports` or `imports` tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
  /// `"./dist/index.js"`, or a bare specifier inside `imports`.
  Literal(String),
  /// `{ "import": ..., "default": ... }`, kept in declaration order.
  Conditional(FxIndexMap<String, Target>),
  /// `[...]`, tried in order.
  List(Vec<Target>),
  /// Explicitly not exported.
  Null,
  /// A number or boolean where a target is expected. Kept so the failure is raised only if
  /// resolution actually reaches it.
  Invalid(String),
}

impl Target {
  pub fn as_conditional(&self) -> Option<&FxIndexMap<String, Target>> {
    match self {
      Self::Conditional(map) => Some(map),
      _ => None,
    }
  }
}

impl From<Value> for Target {
  fn from(value: Value) -> Self {
    match value {
      Value::String(target) => Self::Literal(target),
      Value::Object(map) => {
        Self::Conditional(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect())
      }
      Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
      Value::Null => Self::Null,
      Value::Bool(_) | Value::Number(_) => Self::Invalid(value.to_string()),
    }
  }
}

#[test]
fn test_target_from_json_keeps_declaration_order() {
  let value = serde_json::json!({
    "node": ["./node.js", null],
    "import": "./esm.js",
    "default": false
  });
  let target = Target::from(value);
  let map = target.as_conditional().unwrap();
  assert_eq!(map.keys().collect::<Vec<_>>(), ["node", "import", "default"]);
  assert_eq!(map["node"], Target::List(vec![Target::Literal("./node.js".into()), Target::Null]));
  assert_eq!(map["default"], Target::Invalid("false".into()));
}
