//! WebSocket frame DTOs and the JSON envelope codec.
//!
//! Every frame is a UTF-8 text frame holding one JSON object with a
//! mandatory `type` string:
//!
//! ```text
//! {"type":"webrtc_signal","signal":<opaque>,"sender":<id>,"target":<id>}
//! {"type":"chat_message","message":<string>,"sender":<id>,"timestamp":<string>}
//! ```
//!
//! Outbound frames use the same shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    EnvelopeCodec, EnvelopeError, InboundFrame, SignalEnvelope,
    envelope::{CHAT_MESSAGE_TYPE, WEBRTC_SIGNAL_TYPE},
};

/// Wire representation of a relayed envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireEnvelope {
    WebrtcSignal {
        signal: Value,
        sender: String,
        #[serde(default)]
        target: Option<String>,
    },
    ChatMessage {
        message: String,
        sender: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
}

/// JSON text-frame codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEnvelopeCodec;

impl JsonEnvelopeCodec {
    pub fn new() -> Self {
        Self
    }
}

impl EnvelopeCodec for JsonEnvelopeCodec {
    fn parse(&self, raw: &str) -> Result<InboundFrame, EnvelopeError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| EnvelopeError::InvalidJson(e.to_string()))?;
        let type_tag = match value.as_object() {
            Some(object) => object
                .get("type")
                .and_then(Value::as_str)
                .ok_or(EnvelopeError::MissingType)?
                .to_string(),
            None => return Err(EnvelopeError::NotAnObject),
        };

        if type_tag != WEBRTC_SIGNAL_TYPE && type_tag != CHAT_MESSAGE_TYPE {
            return Ok(InboundFrame::Ignored { type_tag });
        }

        let wire: WireEnvelope =
            serde_json::from_value(value).map_err(|e| EnvelopeError::InvalidFields {
                type_tag: type_tag.clone(),
                reason: e.to_string(),
            })?;
        let envelope =
            SignalEnvelope::try_from(wire).map_err(|e| EnvelopeError::InvalidFields {
                type_tag,
                reason: e.to_string(),
            })?;
        Ok(InboundFrame::Envelope(envelope))
    }

    fn serialize(&self, envelope: &SignalEnvelope) -> Result<String, EnvelopeError> {
        serde_json::to_string(&WireEnvelope::from(envelope))
            .map_err(|e| EnvelopeError::Serialize(e.to_string()))
    }
}
