//! Core authorization types

use serde_json::Value;

/// An object the engine can reason about: an actor requesting permission or
/// a subject a check is evaluated against.
///
/// Implementations supply an explicit type tag instead of relying on runtime
/// reflection. The tag keys ability-definition lookup for actors and subject
/// matching for targets. `attribute` backs attribute-equality conditions and
/// defaults to `None`.
pub trait Entity: Send + Sync {
    /// Type tag, e.g. `"user"` or `"product"`
    fn entity_type(&self) -> &str;

    /// Named attribute as a JSON value, if the entity exposes one
    fn attribute(&self, _key: &str) -> Option<Value> {
        None
    }
}

/// Truthiness of an evaluation result.
///
/// Validators may return any JSON value; a non-boolean result such as a
/// message string still counts as allow. `null`, `false`, `0`, and the empty
/// string count as deny.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Widget;

    impl Entity for Widget {
        fn entity_type(&self) -> &str {
            "widget"
        }
    }

    #[test]
    fn test_attribute_defaults_to_none() {
        let widget = Widget;
        assert_eq!(widget.entity_type(), "widget");
        assert!(widget.attribute("anything").is_none());
    }

    #[test]
    fn test_falsy_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
    }

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(-3.5)));
        assert!(is_truthy(&json!("denied for a reason")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }
}
