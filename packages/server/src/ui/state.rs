//! Server state shared by every handler.

use std::sync::Arc;

use kaigi_shared::time::Clock;

use crate::{
    config::ServerConfig,
    coordination::{ConnectionRegistry, RoomDirectory},
    infrastructure::{
        credential::LiveKitTokenIssuer,
        dto::websocket::JsonEnvelopeCodec,
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryAttentionRepository, InMemoryChatHistoryRepository, InMemoryRoomRepository,
        },
    },
    usecase::{
        ChatHistoryUseCase, ConnectParticipantUseCase, CreateRoomUseCase,
        DisconnectParticipantUseCase, EndRoomUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        ListParticipantsUseCase, RelaySignalUseCase, RoomPresenceUseCase, UpdateAttentionUseCase,
        UpdateMediaStateUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// RelaySignalUseCase（シグナル中継のユースケース）
    pub relay_signal_usecase: Arc<RelaySignalUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub end_room_usecase: Arc<EndRoomUseCase>,
    pub list_participants_usecase: Arc<ListParticipantsUseCase>,
    pub chat_history_usecase: Arc<ChatHistoryUseCase>,
    pub update_attention_usecase: Arc<UpdateAttentionUseCase>,
    pub update_media_state_usecase: Arc<UpdateMediaStateUseCase>,
    pub room_presence_usecase: Arc<RoomPresenceUseCase>,
    /// 各コネクションの送信キューの容量
    pub outbound_queue_capacity: usize,
}

impl AppState {
    /// Wire every use case against in-memory stores.
    ///
    /// Dependencies are created in order:
    /// 1. Repositories and coordination registries
    /// 2. MessagePusher, codec and credential issuer
    /// 3. UseCases
    pub fn in_memory(config: &ServerConfig, clock: Arc<dyn Clock>) -> Self {
        // 1. Repository（インメモリ DB）とレジストリ
        let room_repository = Arc::new(InMemoryRoomRepository::new());
        let chat_repository = Arc::new(InMemoryChatHistoryRepository::new());
        let attention_repository = Arc::new(InMemoryAttentionRepository::new());
        let registry = Arc::new(ConnectionRegistry::new());
        let directory = Arc::new(RoomDirectory::new());

        // 2. MessagePusher（WebSocket 実装）など
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let codec = Arc::new(JsonEnvelopeCodec::new());
        let credential_issuer = Arc::new(LiveKitTokenIssuer::new(
            config.media.url.clone(),
            config.media.api_key.clone(),
            config.media.api_secret.clone(),
            config.media.token_ttl_secs,
            clock.clone(),
        ));

        // 3. UseCase
        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(
                room_repository.clone(),
                registry.clone(),
                directory.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new(
                registry.clone(),
                directory.clone(),
                message_pusher.clone(),
            )),
            relay_signal_usecase: Arc::new(RelaySignalUseCase::new(
                registry.clone(),
                directory.clone(),
                message_pusher.clone(),
                codec,
                clock.clone(),
                config.signal_routing,
            )),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                room_repository.clone(),
                credential_issuer.clone(),
                clock.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                room_repository.clone(),
                credential_issuer,
                clock.clone(),
            )),
            leave_room_usecase: Arc::new(LeaveRoomUseCase::new(room_repository.clone())),
            end_room_usecase: Arc::new(EndRoomUseCase::new(
                room_repository.clone(),
                registry.clone(),
                directory.clone(),
                message_pusher,
            )),
            list_participants_usecase: Arc::new(ListParticipantsUseCase::new(
                room_repository.clone(),
            )),
            chat_history_usecase: Arc::new(ChatHistoryUseCase::new(
                room_repository.clone(),
                chat_repository,
                clock.clone(),
            )),
            update_attention_usecase: Arc::new(UpdateAttentionUseCase::new(
                room_repository.clone(),
                attention_repository,
                clock,
            )),
            update_media_state_usecase: Arc::new(UpdateMediaStateUseCase::new(room_repository)),
            room_presence_usecase: Arc::new(RoomPresenceUseCase::new(registry, directory)),
            outbound_queue_capacity: config.outbound_queue_capacity,
        }
    }
}
