//! Conversion logic between DTOs and domain entities.

use kaigi_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    AttentionStats, ChatRecord, MessageContent, Participant, ParticipantId, Room, SignalEnvelope,
    ValueObjectError,
};
use crate::infrastructure::dto::{http as http_dto, websocket as ws_dto};

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<ws_dto::WireEnvelope> for SignalEnvelope {
    type Error = ValueObjectError;

    fn try_from(dto: ws_dto::WireEnvelope) -> Result<Self, Self::Error> {
        match dto {
            ws_dto::WireEnvelope::WebrtcSignal {
                signal,
                sender,
                target,
            } => Ok(Self::WebRtcSignal {
                signal,
                sender: ParticipantId::new(sender)?,
                target: target.map(ParticipantId::new).transpose()?,
            }),
            ws_dto::WireEnvelope::ChatMessage {
                message,
                sender,
                timestamp,
            } => Ok(Self::ChatMessage {
                message: MessageContent::new(message)?,
                sender: ParticipantId::new(sender)?,
                timestamp,
            }),
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&SignalEnvelope> for ws_dto::WireEnvelope {
    fn from(model: &SignalEnvelope) -> Self {
        match model {
            SignalEnvelope::WebRtcSignal {
                signal,
                sender,
                target,
            } => Self::WebrtcSignal {
                signal: signal.clone(),
                sender: sender.as_str().to_string(),
                target: target.as_ref().map(|t| t.as_str().to_string()),
            },
            SignalEnvelope::ChatMessage {
                message,
                sender,
                timestamp,
            } => Self::ChatMessage {
                message: message.as_str().to_string(),
                sender: sender.as_str().to_string(),
                timestamp: timestamp.clone(),
            },
        }
    }
}

impl From<&ParticipantId> for http_dto::UserDto {
    fn from(model: &ParticipantId) -> Self {
        Self {
            username: model.as_str().to_string(),
        }
    }
}

impl From<&Room> for http_dto::RoomDto {
    fn from(model: &Room) -> Self {
        Self {
            room_id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            host: (&model.host).into(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
            is_active: model.is_active,
        }
    }
}

impl From<&Participant> for http_dto::ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            user: (&model.user_id).into(),
            name: model.name.as_str().to_string(),
            joined_at: timestamp_to_rfc3339(model.joined_at.value()),
            is_muted: model.is_muted,
            is_video_off: model.is_video_off,
        }
    }
}

impl From<&ChatRecord> for http_dto::ChatMessageDto {
    fn from(model: &ChatRecord) -> Self {
        Self {
            id: model.id,
            sender: (&model.sender).into(),
            message: model.message.as_str().to_string(),
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}

impl From<&AttentionStats> for http_dto::AttentionStatsDto {
    fn from(model: &AttentionStats) -> Self {
        Self {
            attention_score: model.attention_score,
            total_time: model.total_time,
            focused_time: model.focused_time,
            updated_at: timestamp_to_rfc3339(model.updated_at.value()),
        }
    }
}
