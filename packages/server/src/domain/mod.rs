//! Domain layer for the room coordination server.
//!
//! This module contains business types and the interfaces (traits) the
//! use cases depend on. Concrete implementations live in `infrastructure`.

pub mod credential;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use credential::CredentialIssuer;
#[cfg(test)]
pub use credential::MockCredentialIssuer;
pub use entity::{
    AttentionStats, AttentionUpdate, ChatRecord, ConnectionBinding, MediaStateUpdate, Participant,
    Room,
};
pub use envelope::{EnvelopeCodec, InboundFrame, SignalEnvelope};
pub use error::{
    CredentialError, EnvelopeError, MessagePushError, RegistryError, RepositoryError,
    ValueObjectError,
};
pub use message_pusher::{DeliveryFailure, MessagePusher, PusherChannel, PusherReceiver};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::{AttentionRepository, ChatHistoryRepository, RoomRepository};
pub use value_object::{
    ConnectionHandle, DisplayName, MessageContent, ParticipantId, RoomId, RoomIdFactory, Timestamp,
};
