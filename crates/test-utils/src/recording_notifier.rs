use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use benchmatrix::errors::{BenchError, Result};
use benchmatrix::notify::{Level, Notifier};

/// Records every event it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle on the recorded events.
    pub fn events(&self) -> Arc<Mutex<Vec<(Level, String)>>> {
        Arc::clone(&self.events)
    }
}

impl Notifier for RecordingNotifier {
    fn emit<'a>(
        &'a self,
        level: Level,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let events = Arc::clone(&self.events);
        Box::pin(async move {
            events.lock().unwrap().push((level, message.to_string()));
            Ok(())
        })
    }
}

/// A sink whose transport is always down.
#[derive(Debug, Clone, Default)]
pub struct FailingNotifier {
    attempts: Arc<Mutex<usize>>,
}

impl FailingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> Arc<Mutex<usize>> {
        Arc::clone(&self.attempts)
    }
}

impl Notifier for FailingNotifier {
    fn emit<'a>(
        &'a self,
        _level: Level,
        _message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let attempts = Arc::clone(&self.attempts);
        Box::pin(async move {
            *attempts.lock().unwrap() += 1;
            Err(BenchError::Other(anyhow::anyhow!("transport unavailable")))
        })
    }
}
