//! Domain error types.

use thiserror::Error;

use super::value_object::ConnectionHandle;

/// Validation failure while constructing a value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must not start or end with whitespace")]
    SurroundingWhitespace(&'static str),

    #[error("{kind} must be at most {max} characters")]
    TooLong { kind: &'static str, max: usize },
}

/// Connection Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("connection '{0}' is already bound")]
    DuplicateConnection(ConnectionHandle),

    #[error("connection '{0}' is not bound")]
    UnknownConnection(ConnectionHandle),
}

/// Errors returned by the repository collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("room '{0}' already exists")]
    RoomAlreadyExists(String),

    #[error("participant '{user_id}' not found in room '{room_id}'")]
    ParticipantNotFound { room_id: String, user_id: String },
}

/// Per-recipient delivery failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("outbound queue of client '{0}' is full")]
    QueueFull(String),

    #[error("outbound channel of client '{0}' is closed")]
    ChannelClosed(String),
}

/// Inbound frame could not be turned into an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("frame is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("frame is not a JSON object")]
    NotAnObject,

    #[error("frame has no string `type` field")]
    MissingType,

    #[error("invalid `{type_tag}` frame: {reason}")]
    InvalidFields { type_tag: String, reason: String },

    #[error("binary frames are not supported")]
    BinaryFrame,

    #[error("failed to serialize envelope: {0}")]
    Serialize(String),
}

/// Credential minting failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("failed to sign media token: {0}")]
    Signing(String),
}
