// src/notify/log.rs

use std::future::Future;
use std::pin::Pin;

use tracing::{error, info, warn};

use crate::errors::Result;
use crate::notify::{Level, Notifier};

/// Writes events to the local `tracing` log. Never fails.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier {
    title: String,
}

impl TracingNotifier {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Notifier for TracingNotifier {
    fn emit<'a>(
        &'a self,
        level: Level,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        match level {
            Level::Info => info!(title = %self.title, "{message}"),
            Level::Warning => warn!(title = %self.title, "{message}"),
            Level::Error => error!(title = %self.title, "{message}"),
        }
        Box::pin(async { Ok(()) })
    }
}
