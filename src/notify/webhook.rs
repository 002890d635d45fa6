// src/notify/webhook.rs

//! Chat webhook sink.
//!
//! Each event is POSTed as `{"text": "[LEVEL] <title>: <message>"}`, the
//! shape accepted by Slack/Mattermost style incoming webhooks.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use anyhow::{Context, anyhow};
use serde_json::json;

use crate::config::NotifySection;
use crate::errors::Result;
use crate::notify::{Level, Notifier};

/// Everything the webhook sink needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub url: String,
    pub title: String,
    pub min_level: Level,
}

impl WebhookConfig {
    /// Resolve the webhook from `[notify]`, reading the URL from the
    /// environment variable named by `webhook_url_env`.
    ///
    /// Returns `None` when no variable is configured or it is unset/empty.
    pub fn from_section(section: &NotifySection) -> Option<Self> {
        let var = section.webhook_url_env.as_deref()?;
        let url = std::env::var(var).ok().filter(|u| !u.trim().is_empty())?;
        Some(Self {
            url,
            title: section.title.clone(),
            min_level: section.min_level,
        })
    }
}

/// Text sent for one event.
pub fn format_message(title: &str, level: Level, message: &str) -> String {
    format!("[{}] {title}: {message}", level.as_str().to_uppercase())
}

pub struct WebhookNotifier {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookNotifier {
    pub fn new(config: WebhookConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building webhook HTTP client")?;
        Ok(Self { client, config })
    }
}

impl Notifier for WebhookNotifier {
    fn emit<'a>(
        &'a self,
        level: Level,
        message: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            if level < self.config.min_level {
                return Ok(());
            }

            let body = json!({
                "text": format_message(&self.config.title, level, message),
            });

            let resp = self
                .client
                .post(&self.config.url)
                .json(&body)
                .send()
                .await
                .context("sending webhook notification")?;

            let status = resp.status();
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                return Err(anyhow!("webhook rejected notification ({status}): {text}").into());
            }

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_template() {
        assert_eq!(
            format_message("Travelling Salesman Problem", Level::Error, "a.tsp / GREEDY failed"),
            "[ERROR] Travelling Salesman Problem: a.tsp / GREEDY failed"
        );
    }

    #[test]
    fn no_env_var_configured_means_no_webhook() {
        let section = NotifySection::default();
        assert_eq!(WebhookConfig::from_section(&section), None);
    }

    #[test]
    fn unset_env_var_means_no_webhook() {
        let section = NotifySection {
            webhook_url_env: Some("BENCHMATRIX_TEST_SURELY_UNSET_WEBHOOK".to_string()),
            ..NotifySection::default()
        };
        assert_eq!(WebhookConfig::from_section(&section), None);
    }
}
