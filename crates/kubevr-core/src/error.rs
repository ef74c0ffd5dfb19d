//! Error types for the core crate.

/// Failures while encoding or decoding wire frames.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while talking to the event channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("event channel is closed")]
    Closed,

    #[error("failed to encode outbound event: {0}")]
    Encode(#[from] ProtocolError),
}

/// An object filter string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("empty selector in filter {0:?}")]
    EmptySelector(String),

    #[error("invalid selector {0:?}")]
    InvalidSelector(String),
}

/// A color string that is not `#rrggbb` / `0xrrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ColorError(pub String);
