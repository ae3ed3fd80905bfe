use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection task is no longer running")]
    Closed,
    #[error("socket.io client failed: {0}")]
    Socket(#[from] rust_socketio::Error),
    #[error("payload is not valid JSON: {0}")]
    Codec(#[from] serde_json::Error),
}
