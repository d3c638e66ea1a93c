//! HTTP API request and response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_ROOM_NAME: &str = "Meeting Room";
const ANONYMOUS: &str = "Anonymous";

fn default_room_name() -> String {
    DEFAULT_ROOM_NAME.to_string()
}

fn anonymous() -> String {
    ANONYMOUS.to_string()
}

// ========================================
// Requests
// ========================================

/// `POST /api/rooms`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomRequest {
    #[serde(default = "default_room_name")]
    pub name: String,
    #[serde(default = "anonymous")]
    pub host_name: String,
    /// Seed of the room identifier; clients send `Date.now()` as a number
    /// or a string.
    #[serde(default)]
    pub timestamp: Option<Value>,
}

impl CreateRoomRequest {
    /// Room id seed, if the client provided a usable one.
    pub fn seed(&self) -> Option<String> {
        match &self.timestamp {
            Some(Value::Number(number)) => Some(number.to_string()),
            Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
            _ => None,
        }
    }
}

/// `POST /api/rooms/{room_id}/join`
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRoomRequest {
    #[serde(default = "anonymous")]
    pub name: String,
}

/// `POST /api/rooms/{room_id}/leave`
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveRoomRequest {
    pub username: String,
}

/// `POST /api/rooms/{room_id}/end`
#[derive(Debug, Clone, Deserialize)]
pub struct EndRoomRequest {
    pub host_name: String,
}

/// `POST /api/rooms/{room_id}/messages`
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default = "anonymous")]
    pub sender: String,
    #[serde(default)]
    pub message: String,
}

/// `POST /api/rooms/{room_id}/attention`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAttentionRequest {
    pub username: String,
    #[serde(default)]
    pub attention_score: Option<i32>,
    #[serde(default)]
    pub total_time: Option<i64>,
    #[serde(default)]
    pub focused_time: Option<i64>,
}

/// `POST /api/rooms/{room_id}/media`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMediaStateRequest {
    pub username: String,
    #[serde(default)]
    pub is_muted: Option<bool>,
    #[serde(default)]
    pub is_video_off: Option<bool>,
}

// ========================================
// Responses
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDto {
    pub room_id: String,
    pub name: String,
    pub host: UserDto,
    pub created_at: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub user: UserDto,
    pub name: String,
    pub joined_at: String,
    pub is_muted: bool,
    pub is_video_off: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: String,
    pub name: String,
    pub host: String,
    pub livekit_url: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub room: RoomDto,
    pub participants: Vec<ParticipantDto>,
    pub livekit_url: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub id: u64,
    pub sender: UserDto,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttentionStatsDto {
    pub attention_score: i32,
    pub total_time: i64,
    pub focused_time: i64,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndRoomResponse {
    pub room: RoomDto,
    pub closed_connections: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDto {
    pub handle: String,
    pub participant_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConnectionsDto {
    pub room_id: String,
    pub connections: Vec<ConnectionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
