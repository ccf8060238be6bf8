use thiserror::Error;

use super::commands::RoomCommand;

/// Failure of an HTTP round trip
#[derive(Debug, Error)]
#[error("HTTP transport error: {0}")]
pub struct TransportError(pub String);

/// Failure of a single socket operation
#[derive(Debug, Error)]
pub enum SocketError {
    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("close failed: {0}")]
    CloseFailed(String),

    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

/// Room creation failed; nothing exists remotely that the caller can use
#[derive(Debug, Error)]
pub enum RoomCreationError {
    #[error("error performing HTTP request: {0}")]
    Transport(#[from] TransportError),

    #[error("error reading HTTP response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("room creation response carried no session cookie")]
    MissingCredential,
}

/// The room socket could not be opened
#[derive(Debug, Error)]
#[error("error connecting to room WS: {reason}")]
pub struct ConnectionError {
    pub reason: String,
    /// Body of a rejected handshake, when the server sent one
    pub response_body: Option<String>,
}

impl ConnectionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            response_body: None,
        }
    }

    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.response_body = body.filter(|b| !b.is_empty());
        self
    }
}

/// One command in the setup sequence could not be sent
#[derive(Debug, Error)]
#[error("error updating {step}: {source}")]
pub struct PermissionUpdateError {
    pub step: String,
    /// Zero-based position of the failed command in the setup sequence
    pub position: usize,
    #[source]
    pub source: SocketError,
}

impl PermissionUpdateError {
    pub fn new(command: &RoomCommand, position: usize, source: SocketError) -> Self {
        Self {
            step: command.to_string(),
            position,
            source,
        }
    }
}

/// Room exists but its setup did not complete
#[derive(Debug, Error)]
pub enum ConfigureError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    PermissionUpdate(#[from] PermissionUpdateError),
}
