use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::warn;

use crate::error::Error;
use crate::services::retry::RetryPolicy;

/// Fire-and-forget text delivery to one fixed destination. Failures are
/// logged by the caller and never fail an evaluation pass.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send_message(
        &self,
        webhook_url: &str,
        sender_label: &str,
        text: &str,
    ) -> Result<(), Error>;
}

/// Slack incoming-webhook client.
#[derive(Clone)]
pub struct SlackClient {
    http: Client,
    retry: RetryPolicy,
}

impl SlackClient {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            http: Client::new(),
            retry,
        }
    }

    async fn post_once(
        &self,
        webhook_url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.http.post(webhook_url).json(body).send().await
    }
}

#[async_trait]
impl NotificationSink for SlackClient {
    async fn send_message(
        &self,
        webhook_url: &str,
        sender_label: &str,
        text: &str,
    ) -> Result<(), Error> {
        if webhook_url.trim().is_empty() {
            return Err(Error::MissingConfig("NOTIFICATIONS_SLACK_WEBHOOK"));
        }

        let body = json!({ "username": sender_label, "text": text });

        let mut attempt = 0;
        loop {
            match self.post_once(webhook_url, &body).await {
                Ok(res) if res.status().is_success() => return Ok(()),
                Ok(res) => {
                    let status = res.status();
                    if attempt < self.retry.max_retries && self.retry.is_retryable_status(status) {
                        attempt += 1;
                        warn!(%status, attempt, "webhook post failed, retrying");
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                        continue;
                    }
                    return Err(Error::WebhookStatus(status));
                }
                Err(e) => {
                    if attempt < self.retry.max_retries {
                        attempt += 1;
                        warn!(error = %e, attempt, "webhook post failed, retrying");
                        tokio::time::sleep(self.retry.delay(attempt)).await;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}
