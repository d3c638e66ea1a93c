//! Signal envelopes relayed between the connections of a room.
//!
//! The wire format (JSON text frames) is handled by an `EnvelopeCodec`
//! implementation in the infrastructure layer; this module only knows the
//! closed set of envelope kinds.

use serde_json::Value;

use super::{
    error::EnvelopeError,
    value_object::{MessageContent, ParticipantId},
};

/// Wire discriminator of WebRTC signaling envelopes.
pub const WEBRTC_SIGNAL_TYPE: &str = "webrtc_signal";
/// Wire discriminator of chat envelopes.
pub const CHAT_MESSAGE_TYPE: &str = "chat_message";

/// A single signaling or chat event. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalEnvelope {
    /// Opaque WebRTC payload (SDP offer/answer, ICE candidate...).
    ///
    /// `target` names the intended recipient; under broadcast routing it is
    /// advisory metadata for the receiving clients.
    WebRtcSignal {
        signal: Value,
        sender: ParticipantId,
        target: Option<ParticipantId>,
    },
    /// Room-wide chat message.
    ChatMessage {
        message: MessageContent,
        sender: ParticipantId,
        timestamp: Option<String>,
    },
}

impl SignalEnvelope {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::WebRtcSignal { .. } => WEBRTC_SIGNAL_TYPE,
            Self::ChatMessage { .. } => CHAT_MESSAGE_TYPE,
        }
    }

    pub fn sender(&self) -> &ParticipantId {
        match self {
            Self::WebRtcSignal { sender, .. } | Self::ChatMessage { sender, .. } => sender,
        }
    }

    pub fn target(&self) -> Option<&ParticipantId> {
        match self {
            Self::WebRtcSignal { target, .. } => target.as_ref(),
            Self::ChatMessage { .. } => None,
        }
    }

    /// Replace the sender identity.
    pub fn with_sender(self, sender: ParticipantId) -> Self {
        match self {
            Self::WebRtcSignal { signal, target, .. } => Self::WebRtcSignal {
                signal,
                sender,
                target,
            },
            Self::ChatMessage {
                message, timestamp, ..
            } => Self::ChatMessage {
                message,
                sender,
                timestamp,
            },
        }
    }

    /// Fill in the chat timestamp when the client did not send one.
    pub fn with_default_timestamp(self, timestamp: impl FnOnce() -> String) -> Self {
        match self {
            Self::ChatMessage {
                message,
                sender,
                timestamp: None,
            } => Self::ChatMessage {
                message,
                sender,
                timestamp: Some(timestamp()),
            },
            other => other,
        }
    }
}

/// Result of parsing one inbound frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    Envelope(SignalEnvelope),
    /// Well-formed frame with a `type` nobody handles. Neither routed nor
    /// reported as an error.
    Ignored { type_tag: String },
}

/// Wire codec for envelopes.
///
/// `parse(serialize(e))` must yield `InboundFrame::Envelope(e)`.
pub trait EnvelopeCodec: Send + Sync {
    fn parse(&self, raw: &str) -> Result<InboundFrame, EnvelopeError>;

    fn serialize(&self, envelope: &SignalEnvelope) -> Result<String, EnvelopeError>;
}
