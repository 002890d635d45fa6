// src/notify/mod.rs

//! Pluggable alerting boundary.
//!
//! The driver only knows the [`Notifier`] capability: emit a message at a
//! [`Level`]. Concrete sinks decide where the event goes:
//!
//! - [`log::TracingNotifier`] writes it to the local `tracing` log.
//! - [`webhook::WebhookNotifier`] relays it to a chat webhook.
//! - [`FanoutNotifier`] forwards to several sinks.
//!
//! Delivery is best-effort. The driver logs and swallows any error returned
//! here; a failing sink never aborts a session.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
pub use crate::types::Level;

pub mod log;
pub mod webhook;

pub use log::TracingNotifier;
pub use webhook::{WebhookConfig, WebhookNotifier};

/// Capability to relay a session event somewhere.
pub trait Notifier: Send + Sync {
    fn emit<'a>(
        &'a self,
        level: Level,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Forwards every event to each inner sink in order.
///
/// All sinks are tried even if one fails; the first error is returned.
#[derive(Default)]
pub struct FanoutNotifier {
    sinks: Vec<Box<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl Notifier + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl Notifier for FanoutNotifier {
    fn emit<'a>(
        &'a self,
        level: Level,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut first_err = None;
            for sink in &self.sinks {
                if let Err(err) = sink.emit(level, message).await {
                    first_err.get_or_insert(err);
                }
            }
            match first_err {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::errors::BenchError;

    struct Recording(Arc<Mutex<Vec<String>>>);

    impl Notifier for Recording {
        fn emit<'a>(
            &'a self,
            level: Level,
            message: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
            let seen = Arc::clone(&self.0);
            Box::pin(async move {
                seen.lock().unwrap().push(format!("{level}:{message}"));
                Ok(())
            })
        }
    }

    struct Broken;

    impl Notifier for Broken {
        fn emit<'a>(
            &'a self,
            _level: Level,
            _message: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
            Box::pin(async { Err(BenchError::ConfigError("down".to_string())) })
        }
    }

    #[tokio::test]
    async fn fanout_reaches_every_sink_even_after_a_failure() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let fanout = FanoutNotifier::new()
            .with(Broken)
            .with(Recording(Arc::clone(&seen)));

        let res = fanout.emit(Level::Warning, "disk almost full").await;

        assert!(res.is_err());
        assert_eq!(*seen.lock().unwrap(), vec!["warning:disk almost full"]);
    }
}
