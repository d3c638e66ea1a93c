//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::{AttentionUpdate, MediaStateUpdate, MessageContent, ParticipantId, RoomId},
    infrastructure::dto::http::{
        AttentionStatsDto, ChatMessageDto, ConnectionDto, CreateRoomRequest, CreateRoomResponse,
        EndRoomRequest, EndRoomResponse, JoinRoomRequest, JoinRoomResponse, LeaveRoomRequest,
        ParticipantDto, RoomConnectionsDto, SendMessageRequest, UpdateAttentionRequest,
        UpdateMediaStateRequest,
    },
    ui::state::AppState,
    usecase::CreateRoomInput,
};

use super::error::ApiError;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a room; the host receives a media token right away.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, ApiError> {
    let seed = request.seed();
    let created = state
        .create_room_usecase
        .execute(CreateRoomInput {
            name: request.name,
            host_name: request.host_name,
            seed,
        })
        .await?;

    // Domain Model から DTO への変換
    Ok(Json(CreateRoomResponse {
        room_id: created.room.id.as_str().to_string(),
        name: created.room.name.as_str().to_string(),
        host: created.room.host.as_str().to_string(),
        livekit_url: created.media_url,
        token: created.token,
    }))
}

pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(request): Json<JoinRoomRequest>,
) -> Result<Json<JoinRoomResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let joined = state
        .join_room_usecase
        .execute(room_id, request.name)
        .await?;

    Ok(Json(JoinRoomResponse {
        room: (&joined.room).into(),
        participants: joined.participants.iter().map(ParticipantDto::from).collect(),
        livekit_url: joined.media_url,
        token: joined.token,
    }))
}

pub async fn leave_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(request): Json<LeaveRoomRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let user_id = ParticipantId::try_from(request.username)?;
    state
        .leave_room_usecase
        .execute(&room_id, &user_id)
        .await?;
    Ok(Json(serde_json::json!({"status": "ok"})))
}

pub async fn get_participants(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<ParticipantDto>>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let participants = state.list_participants_usecase.execute(&room_id).await?;
    Ok(Json(participants.iter().map(ParticipantDto::from).collect()))
}

/// Chat history ordered by timestamp.
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<ChatMessageDto>>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let history = state.chat_history_usecase.history(&room_id).await?;
    Ok(Json(history.iter().map(ChatMessageDto::from).collect()))
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ChatMessageDto>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let sender = ParticipantId::try_from(request.sender)?;
    let message = MessageContent::try_from(request.message)?;
    let record = state
        .chat_history_usecase
        .send(&room_id, &sender, message)
        .await?;
    Ok(Json((&record).into()))
}

pub async fn update_attention(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(request): Json<UpdateAttentionRequest>,
) -> Result<Json<AttentionStatsDto>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let user_id = ParticipantId::try_from(request.username)?;
    let stats = state
        .update_attention_usecase
        .execute(
            &room_id,
            &user_id,
            AttentionUpdate {
                attention_score: request.attention_score,
                total_time: request.total_time,
                focused_time: request.focused_time,
            },
        )
        .await?;
    Ok(Json((&stats).into()))
}

pub async fn update_media_state(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(request): Json<UpdateMediaStateRequest>,
) -> Result<Json<ParticipantDto>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let user_id = ParticipantId::try_from(request.username)?;
    let participant = state
        .update_media_state_usecase
        .execute(
            &room_id,
            &user_id,
            MediaStateUpdate {
                is_muted: request.is_muted,
                is_video_off: request.is_video_off,
            },
        )
        .await?;
    Ok(Json((&participant).into()))
}

/// End a room (host only) and close its live connections.
pub async fn end_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Json(request): Json<EndRoomRequest>,
) -> Result<Json<EndRoomResponse>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let requester = ParticipantId::try_from(request.host_name)?;
    let ended = state
        .end_room_usecase
        .execute(&room_id, &requester)
        .await?;
    Ok(Json(EndRoomResponse {
        room: (&ended.room).into(),
        closed_connections: ended.closed_connections,
    }))
}

/// Debug endpoint listing the live connections of a room
pub async fn debug_room_connections(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomConnectionsDto>, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let entries = state.room_presence_usecase.execute(&room_id).await;
    Ok(Json(RoomConnectionsDto {
        room_id: room_id.as_str().to_string(),
        connections: entries
            .into_iter()
            .map(|entry| ConnectionDto {
                handle: entry.handle.to_string(),
                participant_id: entry.participant_id.into_string(),
            })
            .collect(),
    }))
}

/// Debug endpoint listing rooms that have at least one live connection
pub async fn debug_live_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .room_presence_usecase
            .live_rooms()
            .into_iter()
            .map(RoomId::into_string)
            .collect(),
    )
}
