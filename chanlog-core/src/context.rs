use std::{collections::BTreeMap, error::Error as StdError, fmt::Write};

use serde_json::Value;

/// Placeholder values attached to a log call, plus an optional error trace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    fields: BTreeMap<String, Value>,
    exception: Option<Exception>,
}

#[derive(Debug, Clone, PartialEq)]
struct Exception {
    message: String,
    trace: String,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Attaches an error. It is rendered with its whole `source()` chain.
    ///
    /// Unless a field named `exception` is set, the `{exception}` placeholder
    /// stands for the error message.
    pub fn with_exception(self, error: &(dyn StdError + 'static)) -> Self {
        Self {
            exception: Some(Exception {
                message: error.to_string(),
                trace: render_trace(error),
            }),
            ..self
        }
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// The error trace, one cause per line.
    pub fn exception(&self) -> Option<&str> {
        self.exception.as_ref().map(|e| e.trace.as_str())
    }

    pub fn exception_message(&self) -> Option<&str> {
        self.exception.as_ref().map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.exception.is_none()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            exception: None,
        }
    }
}

fn render_trace(error: &(dyn StdError + 'static)) -> String {
    let mut trace = error.to_string();
    let mut source = error.source();
    let mut depth = 0;
    while let Some(cause) = source {
        let _ = write!(trace, "\n#{depth} caused by: {cause}");
        depth += 1;
        source = cause.source();
    }
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failure")]
    struct Outer(#[source] std::io::Error);

    #[test]
    fn test_builder_and_lookup() {
        let context = Context::new().with("user", "bob").with("id", 42);
        assert_eq!(context.get("user"), Some(&Value::from("bob")));
        assert_eq!(context.get("id"), Some(&Value::from(42)));
        assert!(context.exception().is_none());
        assert!(!context.is_empty());
        assert!(Context::new().is_empty());
    }

    #[test]
    fn test_exception_trace_follows_sources() {
        let error = Outer(std::io::Error::other("disk full"));
        let context = Context::new().with_exception(&error);
        assert_eq!(
            context.exception(),
            Some("outer failure\n#0 caused by: disk full")
        );
    }

    #[test]
    fn test_from_iterator() {
        let context: Context = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(context.fields().len(), 2);
    }
}
