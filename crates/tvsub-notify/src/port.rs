//! `NotifierPort` implementation for `WebhookNotifier`.

use async_trait::async_trait;
use tvsub_core::{NotifierPort, NotifyError, NotifyTarget, StatusEvent};

use crate::client::WebhookNotifier;
use crate::error::WebhookError;

fn to_notify_error(err: WebhookError) -> NotifyError {
    match err {
        WebhookError::Status(status) => NotifyError::Status { status },
        WebhookError::Rejected(reason) => NotifyError::Rejected { reason },
        WebhookError::InvalidResponse(message) => NotifyError::InvalidResponse { message },
        WebhookError::Network(e) => NotifyError::Transport {
            message: e.to_string(),
        },
    }
}

#[async_trait]
impl NotifierPort for WebhookNotifier {
    async fn notify(&self, target: &NotifyTarget, event: &StatusEvent) -> Result<(), NotifyError> {
        if target.server.trim().is_empty() || target.token.trim().is_empty() {
            return Err(NotifyError::NotConfigured);
        }
        self.send(target, event).await.map_err(to_notify_error)
    }
}
