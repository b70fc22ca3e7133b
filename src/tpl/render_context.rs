use crate::data::value::Value;
use std::borrow::Cow;

/// The data a section body is rendered against.
///
/// Unlike a scope chain, a context is replaced wholesale when a section pushes a new value:
/// names that miss in the current value do not fall back to outer ones.
pub struct Context<'a> {
    root: &'a Value,
}

impl<'a> Context<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Resolves a tag name against the context.
    ///
    /// Names with a dot after the first character are walked segment by segment; any other name
    /// (including `.` itself) is a single key lookup. A lambda found at the end of the lookup is
    /// called with the context as receiver and its result used instead.
    pub fn lookup(&self, name: &str) -> Option<Cow<'a, Value>> {
        let found = match name.find('.') {
            Some(idx) if idx > 0 => Self::resolve_path(self.root, name),
            _ => self.root.lookup_key(name),
        }?;

        match found {
            Value::Lambda(f) => Some(Cow::Owned(f.call(self.root))),
            v => Some(Cow::Borrowed(v)),
        }
    }

    /// Resolve a dot-separated path, stopping at the first segment that misses.
    fn resolve_path(mut current: &'a Value, path: &str) -> Option<&'a Value> {
        for part in path.split('.') {
            current = current.lookup_key(part)?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::value::ToValue;
    use std::collections::HashMap;

    fn map(pairs: Vec<(&str, Value)>) -> Value {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_lookup_simple() {
        let root = map(vec![("a", Value::I64(1))]);
        let ctx = Context::new(&root);

        assert_eq!(ctx.lookup("a").as_deref(), Some(&Value::I64(1)));
        assert_eq!(ctx.lookup("b"), None);
    }

    #[test]
    fn test_lookup_nested() {
        let root = map(vec![("a", map(vec![("b", Value::I64(2))]))]);
        let ctx = Context::new(&root);

        assert_eq!(ctx.lookup("a.b").as_deref(), Some(&Value::I64(2)));
        assert_eq!(ctx.lookup("a.c"), None);
        assert_eq!(ctx.lookup("x.y"), None);
    }

    #[test]
    fn test_lookup_through_list_index() {
        let root = map(vec![("items", vec!["x", "y"].to_value())]);
        let ctx = Context::new(&root);

        assert_eq!(
            ctx.lookup("items.1").as_deref(),
            Some(&Value::Str("y".to_string()))
        );
    }

    #[test]
    fn test_lookup_leading_dot_is_single_key() {
        let root = map(vec![(".", Value::I32(7)), (".a", Value::I32(8))]);
        let ctx = Context::new(&root);

        assert_eq!(ctx.lookup(".").as_deref(), Some(&Value::I32(7)));
        assert_eq!(ctx.lookup(".a").as_deref(), Some(&Value::I32(8)));
    }

    #[test]
    fn test_lookup_on_scalar_context_misses() {
        let root = Value::Str("text".to_string());
        let ctx = Context::new(&root);
        assert_eq!(ctx.lookup("len"), None);
        assert_eq!(ctx.lookup("a.b"), None);
    }

    #[test]
    fn test_lookup_lambda_receives_context() {
        let mut m = HashMap::new();
        m.insert("first".to_string(), "Ada".to_value());
        m.insert(
            "greeting".to_string(),
            Value::lambda(|ctx| match ctx.lookup_key("first") {
                Some(name) => Value::Str(format!("Hi {}", name)),
                None => Value::Null,
            }),
        );
        let root = Value::Map(m);
        let ctx = Context::new(&root);

        assert_eq!(
            ctx.lookup("greeting").as_deref(),
            Some(&Value::Str("Hi Ada".to_string()))
        );
    }
}
