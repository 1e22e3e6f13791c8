//! Error types for group membership synchronization.

use thiserror::Error;

use crate::handler::HandlerError;
use crate::transport::TransportError;

/// Result type alias using [`SyncError`].
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while synchronizing group membership.
///
/// The variants follow the phases of a run: `Config` before any network
/// activity, `Token` during token acquisition, `Network` during a page
/// fetch, `Data` for undecodable or anomalous payloads, and `Handler` when
/// the caller's reconciliation collaborator rejects a callback.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Required option missing or empty at construction time.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Could not obtain an access token. No handler methods have run.
    #[error("cannot get token")]
    Token {
        #[source]
        source: TransportError,
    },

    /// A membership page fetch failed after the run began.
    ///
    /// `begin` has already fired; callers must discard any state the
    /// handler initialized for this run.
    #[error("cannot get users")]
    Network {
        #[source]
        source: TransportError,
    },

    /// Undecodable response body, or an entirely empty membership listing.
    #[error("{message}")]
    Data {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A handler callback failed; the run is aborted without commit.
    #[error("handler failed during {phase}")]
    Handler {
        phase: &'static str,
        #[source]
        source: HandlerError,
    },
}

impl SyncError {
    pub(crate) fn data(message: impl Into<String>) -> Self {
        Self::Data {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn decode(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Data {
            message: message.into(),
            source: Some(source),
        }
    }
}
