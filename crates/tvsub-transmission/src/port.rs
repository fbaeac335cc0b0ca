//! `DownloadAgentPort` implementation for `TransmissionAgent`.

use std::path::Path;

use async_trait::async_trait;
use tvsub_core::{AgentHandle, DownloadAgentPort, RegistrationError};

use crate::client::TransmissionAgent;
use crate::error::TransmissionError;

fn to_registration_error(endpoint: &str, err: TransmissionError) -> RegistrationError {
    match err {
        TransmissionError::InvalidUrl(_) | TransmissionError::UnsupportedScheme(_) => {
            RegistrationError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: err.to_string(),
            }
        }
        TransmissionError::Io(e) => RegistrationError::Io {
            message: e.to_string(),
        },
        TransmissionError::Rpc(reason) => RegistrationError::Rejected { reason },
        other => RegistrationError::Transport {
            message: other.to_string(),
        },
    }
}

#[async_trait]
impl DownloadAgentPort for TransmissionAgent {
    async fn register(
        &self,
        endpoint: &str,
        artifact: &Path,
    ) -> Result<AgentHandle, RegistrationError> {
        self.add_torrent(endpoint, artifact)
            .await
            .map_err(|e| to_registration_error(endpoint, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            to_registration_error("x", TransmissionError::UnsupportedScheme("ftp".to_string())),
            RegistrationError::InvalidEndpoint { .. }
        ));
        assert_eq!(
            to_registration_error("x", TransmissionError::Rpc("duplicate torrent".to_string())),
            RegistrationError::Rejected {
                reason: "duplicate torrent".to_string()
            }
        );
        assert!(matches!(
            to_registration_error("x", TransmissionError::Status(401)),
            RegistrationError::Transport { .. }
        ));
    }
}
