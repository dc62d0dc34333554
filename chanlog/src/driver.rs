use std::{collections::HashMap, convert::Infallible, error::Error as StdError, fmt, sync::Arc};

use chanlog_core::{Logger, NullLogger, ResolveError, Stream};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::{Map, Value};

use crate::channels::{FileChannel, StreamChannel, StreamParams};

type Factory =
    Box<dyn Fn(Map<String, Value>) -> Result<Arc<dyn Logger>, ResolveError> + Send + Sync>;

/// Maps driver identifiers to typed factories.
///
/// A factory receives the channel's configuration parameters deserialized
/// into its own parameter type, so a missing required field is reported
/// before the factory runs.
pub struct DriverTable {
    factories: HashMap<String, Factory>,
}

impl Default for DriverTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for DriverTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.factories.keys().collect();
        ids.sort();
        f.debug_struct("DriverTable").field("drivers", &ids).finish()
    }
}

impl DriverTable {
    /// A table without any driver.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A table with the `stdout`, `stderr`, `file` and `null` drivers.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table
            .register("stdout", |params: StreamParams| {
                StreamChannel::new(Stream::Stdout, params)
            })
            .register("stderr", |params: StreamParams| {
                StreamChannel::new(Stream::Stderr, params)
            })
            .register("file", FileChannel::new)
            .register("null", |_: IgnoredAny| Ok::<_, Infallible>(NullLogger));
        table
    }

    /// Registers `factory` under `id`, replacing any previous one.
    pub fn register<P, L, E, F>(&mut self, id: &str, factory: F) -> &mut Self
    where
        P: DeserializeOwned + 'static,
        L: Logger + 'static,
        E: Into<Box<dyn StdError + Send + Sync>> + 'static,
        F: Fn(P) -> Result<L, E> + Send + Sync + 'static,
    {
        let driver = id.to_string();
        let build: Factory = Box::new(move |params: Map<String, Value>| {
            let params: P = serde_json::from_value(Value::Object(params))
                .map_err(|source| param_error(&driver, source))?;
            let logger = factory(params).map_err(|source| ResolveError::Construction {
                driver: driver.clone(),
                source: source.into(),
            })?;
            Ok(Arc::new(logger) as Arc<dyn Logger>)
        });
        self.factories.insert(id.to_string(), build);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Builds a logger with the driver `id`.
    pub fn build(
        &self,
        id: &str,
        params: Map<String, Value>,
    ) -> Result<Arc<dyn Logger>, ResolveError> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| ResolveError::UnknownDriver(id.to_string()))?;
        factory(params)
    }
}

fn param_error(driver: &str, source: serde_json::Error) -> ResolveError {
    match missing_field(&source) {
        Some(parameter) => ResolveError::ParameterMissing {
            driver: driver.to_string(),
            parameter,
        },
        None => ResolveError::InvalidParameters {
            driver: driver.to_string(),
            source,
        },
    }
}

// serde reports absent fields as "missing field `name`"
fn missing_field(error: &serde_json::Error) -> Option<String> {
    let message = error.to_string();
    let rest = message.strip_prefix("missing field `")?;
    let (field, _) = rest.split_once('`')?;
    Some(field.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanlog_core::{Context, Level};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Params {
        param: String,
        #[serde(default)]
        retries: u32,
    }

    struct Tagged(#[allow(dead_code)] String);

    impl Logger for Tagged {
        fn log(&self, _: &Level, _: &str, _: &Context) -> chanlog_core::Result<()> {
            Ok(())
        }
    }

    fn table() -> DriverTable {
        let mut table = DriverTable::empty();
        table.register("tagged", |p: Params| {
            if p.retries > 3 {
                Err(std::io::Error::other("too many retries"))
            } else {
                Ok(Tagged(p.param))
            }
        });
        table
    }

    fn params(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_build_with_params() {
        let logger = table()
            .build("tagged", params(serde_json::json!({"param": "Testing"})))
            .unwrap();
        assert!(chanlog_core::covers_standard_levels(logger.as_ref()));
    }

    #[test]
    fn test_unknown_driver() {
        let err = table().build("NotTestingLogger", Map::new()).err().unwrap();
        assert!(matches!(err, ResolveError::UnknownDriver(id) if id == "NotTestingLogger"));
    }

    #[test]
    fn test_missing_parameter() {
        let err = table().build("tagged", Map::new()).err().unwrap();
        assert!(matches!(
            err,
            ResolveError::ParameterMissing { driver, parameter }
                if driver == "tagged" && parameter == "param"
        ));
    }

    #[test]
    fn test_invalid_parameter() {
        let err = table()
            .build("tagged", params(serde_json::json!({"param": 12})))
            .err()
            .unwrap();
        assert!(matches!(err, ResolveError::InvalidParameters { .. }));
    }

    #[test]
    fn test_construction_failure() {
        let err = table()
            .build(
                "tagged",
                params(serde_json::json!({"param": "x", "retries": 9})),
            )
            .err()
            .unwrap();
        match err {
            ResolveError::Construction { driver, source } => {
                assert_eq!(driver, "tagged");
                assert_eq!(source.to_string(), "too many retries");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_builtin_drivers() {
        let table = DriverTable::builtin();
        for id in ["stdout", "stderr", "file", "null"] {
            assert!(table.contains(id), "{id}");
        }
        assert!(table.build("null", params(serde_json::json!({"any": 1}))).is_ok());
        let err = table.build("file", Map::new()).err().unwrap();
        assert!(matches!(
            err,
            ResolveError::ParameterMissing { parameter, .. } if parameter == "filename"
        ));
    }
}
