use std::{borrow::Cow, sync::LazyLock};

use chrono::Utc;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::{context::Context, level::Level};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

fn stringify(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null => Some(Cow::Borrowed("")),
        // not stringifiable, the placeholder is left untouched
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn lookup<'a>(context: &'a Context, key: &str) -> Option<Cow<'a, str>> {
    match context.get(key) {
        Some(value) => stringify(value),
        None if key == "exception" => context.exception_message().map(Cow::Borrowed),
        None => None,
    }
}

/// Replaces `{key}` placeholders with context values in a single pass.
///
/// Unknown keys and keys holding arrays or objects are left as they are.
/// Substituted text is never scanned again. When the context carries an
/// exception, `{exception}` is its message and its trace is appended on a
/// new line.
pub fn interpolate(message: &str, context: &Context) -> String {
    let mut processed = if context.is_empty() {
        message.to_string()
    } else {
        PLACEHOLDER
            .replace_all(message, |caps: &Captures| {
                lookup(context, &caps[1])
                    .map(Cow::into_owned)
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    };
    if let Some(trace) = context.exception() {
        processed.push('\n');
        processed.push_str(trace);
    }
    processed
}

/// Formats one log line: `[time name LEVEL] message`.
pub fn format_log(message: &str, level: &Level, name: Option<&str>, color: bool) -> String {
    let time = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f");
    let level = if color {
        level.label().to_string()
    } else {
        level.as_str().to_uppercase()
    };
    if let Some(name) = name {
        format!("[{time} {name} {level}] {message}")
    } else {
        format!("[{time} {level}] {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_replaces_known_keys() {
        let context = Context::new().with("user", "bob").with("count", 3);
        assert_eq!(
            interpolate("User {user} has {count} items", &context),
            "User bob has 3 items"
        );
    }

    #[test]
    fn test_interpolate_leaves_unknown_and_complex_values() {
        let context = Context::new()
            .with("list", serde_json::json!([1, 2]))
            .with("map", serde_json::json!({"a": 1}));
        assert_eq!(
            interpolate("{missing} {list} {map}", &context),
            "{missing} {list} {map}"
        );
    }

    #[test]
    fn test_interpolate_scalars() {
        let context = Context::new()
            .with("yes", true)
            .with("nothing", Value::Null)
            .with("pi", 3.5);
        assert_eq!(interpolate("{yes}|{nothing}|{pi}", &context), "true||3.5");
    }

    #[test]
    fn test_interpolate_is_single_pass() {
        let context = Context::new().with("a", "{b}").with("b", "nope");
        assert_eq!(interpolate("{a}", &context), "{b}");
    }

    #[test]
    fn test_interpolate_appends_trace() {
        let error = std::io::Error::other("boom");
        let context = Context::new().with("op", "save").with_exception(&error);
        assert_eq!(interpolate("failed {op}", &context), "failed save\nboom");
    }

    #[test]
    fn test_interpolate_exception_placeholder() {
        let error = std::io::Error::other("boom");
        let context = Context::new().with_exception(&error);
        assert_eq!(interpolate("failed: {exception}", &context), "failed: boom\nboom");
        assert_eq!(interpolate("failed: {exception}", &Context::new()), "failed: {exception}");

        let context = Context::new().with("exception", "field").with_exception(&error);
        assert_eq!(interpolate("{exception}", &context), "field\nboom");
    }

    #[test]
    fn test_format_log() {
        let line = format_log("hello", &Level::Info, Some("app"), false);
        assert!(line.starts_with('['));
        assert!(line.ends_with(" app INFO] hello"));
        let line = format_log("hello", &Level::Debug, None, false);
        assert!(line.ends_with(" DEBUG] hello"));
    }
}
