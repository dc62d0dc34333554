use std::sync::Arc;

use chanlog_core::{Context, Level, Logger, Result};

/// Forwards every call to each wrapped logger, in order.
///
/// Errors are not caught: the first failing logger stops the dispatch.
#[derive(Clone)]
pub struct LoggerProxy {
    loggers: Vec<Arc<dyn Logger>>,
}

impl LoggerProxy {
    pub fn new(loggers: Vec<Arc<dyn Logger>>) -> Self {
        debug_assert!(!loggers.is_empty(), "a logger proxy needs a logger");
        Self { loggers }
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    fn call_each<F>(&self, action: F) -> Result<()>
    where
        F: Fn(&dyn Logger) -> Result<()>,
    {
        self.loggers
            .iter()
            .try_for_each(|logger| action(logger.as_ref()))
    }
}

impl Logger for LoggerProxy {
    fn log(&self, level: &Level, message: &str, context: &Context) -> Result<()> {
        self.call_each(|logger| logger.log(level, message, context))
    }
    fn emergency(&self, message: &str, context: &Context) -> Result<()> {
        self.call_each(|logger| logger.emergency(message, context))
    }
    fn alert(&self, message: &str, context: &Context) -> Result<()> {
        self.call_each(|logger| logger.alert(message, context))
    }
    fn critical(&self, message: &str, context: &Context) -> Result<()> {
        self.call_each(|logger| logger.critical(message, context))
    }
    fn error(&self, message: &str, context: &Context) -> Result<()> {
        self.call_each(|logger| logger.error(message, context))
    }
    fn warning(&self, message: &str, context: &Context) -> Result<()> {
        self.call_each(|logger| logger.warning(message, context))
    }
    fn notice(&self, message: &str, context: &Context) -> Result<()> {
        self.call_each(|logger| logger.notice(message, context))
    }
    fn info(&self, message: &str, context: &Context) -> Result<()> {
        self.call_each(|logger| logger.info(message, context))
    }
    fn debug(&self, message: &str, context: &Context) -> Result<()> {
        self.call_each(|logger| logger.debug(message, context))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chanlog_core::{Error, MemoryLogger, Record};

    use super::*;

    struct Journal {
        tag: &'static str,
        entries: Arc<Mutex<Vec<String>>>,
    }

    impl Logger for Journal {
        fn log(&self, level: &Level, message: &str, _: &Context) -> Result<()> {
            self.entries
                .lock()
                .unwrap()
                .push(format!("{} {level} {message}", self.tag));
            Ok(())
        }
    }

    struct Failing;

    impl Logger for Failing {
        fn log(&self, _: &Level, _: &str, _: &Context) -> Result<()> {
            Err(Error::Io(std::io::Error::other("sink down")))
        }
    }

    #[test]
    fn test_dispatch_to_every_logger_once() {
        let a = Arc::new(MemoryLogger::new());
        let b = Arc::new(MemoryLogger::new());
        let proxy = LoggerProxy::new(vec![a.clone(), b.clone()]);
        proxy.debug("Test", &Context::new()).unwrap();
        let expected = vec![Record::new(Level::Debug, "Test", Context::new())];
        assert_eq!(a.records(), expected);
        assert_eq!(b.records(), expected);
    }

    #[test]
    fn test_dispatch_order() {
        let entries = Arc::new(Mutex::new(Vec::new()));
        let proxy = LoggerProxy::new(vec![
            Arc::new(Journal {
                tag: "b",
                entries: entries.clone(),
            }),
            Arc::new(Journal {
                tag: "a",
                entries: entries.clone(),
            }),
        ]);
        proxy.warning("first", &Context::new()).unwrap();
        proxy
            .log(&Level::Custom("trace".into()), "second", &Context::new())
            .unwrap();
        assert_eq!(
            *entries.lock().unwrap(),
            vec!["b warning first", "a warning first", "b trace second", "a trace second"]
        );
    }

    #[test]
    fn test_first_failure_aborts() {
        let before = Arc::new(MemoryLogger::new());
        let after = Arc::new(MemoryLogger::new());
        let proxy = LoggerProxy::new(vec![before.clone(), Arc::new(Failing), after.clone()]);
        assert!(matches!(
            proxy.error("boom", &Context::new()),
            Err(Error::Io(_))
        ));
        assert_eq!(before.records().len(), 1);
        assert!(after.records().is_empty());
        assert_eq!(proxy.len(), 3);
    }
}
