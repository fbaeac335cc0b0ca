//! Transmission RPC wire types (`torrent-add` only).

use serde::{Deserialize, Serialize};
use tvsub_core::AgentHandle;

use crate::error::{TransmissionError, TransmissionResult};

/// Header carrying the CSRF session token.
pub(crate) const SESSION_ID_HEADER: &str = "X-Transmission-Session-Id";

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    pub method: &'static str,
    pub arguments: TorrentAddArguments<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TorrentAddArguments<'a> {
    /// Base64-encoded torrent file.
    pub metainfo: &'a str,
}

impl<'a> RpcRequest<'a> {
    pub const fn torrent_add(metainfo: &'a str) -> Self {
        Self {
            method: "torrent-add",
            arguments: TorrentAddArguments { metainfo },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse {
    pub result: String,
    #[serde(default)]
    pub arguments: Option<TorrentAddResult>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TorrentAddResult {
    #[serde(rename = "torrent-added")]
    pub added: Option<AddedTorrent>,
    #[serde(rename = "torrent-duplicate")]
    pub duplicate: Option<AddedTorrent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddedTorrent {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "hashString")]
    pub hash_string: Option<String>,
}

impl RpcResponse {
    /// Interpret a `torrent-add` response. Added and duplicate torrents both
    /// count as success.
    pub fn into_handle(self) -> TransmissionResult<AgentHandle> {
        if self.result != "success" {
            return Err(TransmissionError::Rpc(self.result));
        }

        let arguments = self.arguments.unwrap_or_default();
        let (torrent, duplicate) = match (arguments.added, arguments.duplicate) {
            (Some(torrent), _) => (torrent, false),
            (None, Some(torrent)) => (torrent, true),
            (None, None) => {
                return Err(TransmissionError::InvalidResponse(
                    "torrent-add returned neither torrent-added nor torrent-duplicate".to_string(),
                ));
            }
        };

        Ok(AgentHandle {
            name: torrent.name,
            id: torrent.id,
            hash: torrent.hash_string,
            duplicate,
        })
    }
}
