//! `send-message` webhook client.

use serde::{Deserialize, Serialize};
use tvsub_core::{NotifyTarget, StatusEvent};

use crate::config::WebhookConfig;
use crate::error::{ClientBuildError, WebhookError, WebhookResult};

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    token: &'a str,
    title: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Notifier posting JSON status events to a message server.
///
/// The server and token come from the [`NotifyTarget`] on every call, so a
/// single notifier follows configuration changes between runs.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    http: reqwest::Client,
    path: String,
}

impl WebhookNotifier {
    /// Create a notifier with the given configuration.
    pub fn new(config: &WebhookConfig) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            path: config.path.clone(),
        })
    }

    fn message_url(&self, server: &str) -> String {
        format!("{}{}", server.trim_end_matches('/'), self.path)
    }

    pub(crate) async fn send(&self, target: &NotifyTarget, event: &StatusEvent) -> WebhookResult<()> {
        let body = SendMessage {
            token: &target.token,
            title: &event.title,
            content: &event.content,
            detail: event.detail.as_deref(),
        };

        let response = self
            .http
            .post(self.message_url(&target.server))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(WebhookError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let reply: SendMessageResponse =
            serde_json::from_str(&text).map_err(|e| WebhookError::InvalidResponse(e.to_string()))?;

        if !reply.success {
            return Err(WebhookError::Rejected(
                reply
                    .error
                    .or(reply.message)
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        tracing::debug!(title = %event.title, "Notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_url_joins_server_and_path() {
        let notifier = WebhookNotifier::new(&WebhookConfig::new()).unwrap();
        assert_eq!(
            notifier.message_url("http://msg.local:8080/"),
            "http://msg.local:8080/send-message"
        );
        assert_eq!(
            notifier.message_url("http://msg.local"),
            "http://msg.local/send-message"
        );
    }

    #[test]
    fn test_body_omits_missing_detail() {
        let body = SendMessage {
            token: "t",
            title: "Torrent added",
            content: "577692",
            detail: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("detail").is_none());
        assert_eq!(json["token"], "t");
    }
}
