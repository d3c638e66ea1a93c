//! UseCase テスト用の共通フィクスチャ

use std::sync::Arc;

use kaigi_shared::time::{Clock, FixedClock};

use crate::{
    coordination::{ConnectionRegistry, RoomDirectory},
    domain::{
        DisplayName, ParticipantId, PusherReceiver, Room, RoomId, RoomRepository, Timestamp,
    },
    infrastructure::{
        message_pusher::{WebSocketMessagePusher, outbound_channel},
        repository::InMemoryRoomRepository,
    },
};

use super::{ConnectParticipantUseCase, ConnectedParticipant};

/// 2023-01-01T00:00:00.000Z
pub const FIXED_NOW: i64 = 1_672_531_200_000;

pub fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock::new(FIXED_NOW))
}

pub fn room_id(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

pub fn participant(id: &str) -> ParticipantId {
    ParticipantId::new(id.to_string()).unwrap()
}

/// アクティブなルームを 1 つ持つ Repository
pub async fn repository_with_room(id: &str, host: &str) -> Arc<InMemoryRoomRepository> {
    let repository = Arc::new(InMemoryRoomRepository::new());
    repository
        .create_room(Room::new(
            room_id(id),
            DisplayName::new("Meeting Room".to_string()).unwrap(),
            participant(host),
            Timestamp::new(FIXED_NOW),
        ))
        .await
        .unwrap();
    repository
}

/// 接続系ユースケースが共有するインメモリの状態
pub struct Coordination {
    pub repository: Arc<InMemoryRoomRepository>,
    pub registry: Arc<ConnectionRegistry>,
    pub directory: Arc<RoomDirectory>,
    pub pusher: Arc<WebSocketMessagePusher>,
}

impl Coordination {
    pub async fn with_room(id: &str, host: &str) -> Self {
        Self {
            repository: repository_with_room(id, host).await,
            registry: Arc::new(ConnectionRegistry::new()),
            directory: Arc::new(RoomDirectory::new()),
            pusher: Arc::new(WebSocketMessagePusher::new()),
        }
    }

    pub fn connect_usecase(&self) -> ConnectParticipantUseCase {
        ConnectParticipantUseCase::new(
            self.repository.clone(),
            self.registry.clone(),
            self.directory.clone(),
            self.pusher.clone(),
            clock(),
        )
    }

    /// 参加者を接続し、送信キューの受信側を返す
    pub async fn connect(&self, room: &str, user: &str) -> (ConnectedParticipant, PusherReceiver) {
        let (tx, rx) = outbound_channel(16);
        let connected = self
            .connect_usecase()
            .execute(room_id(room), participant(user), tx)
            .await
            .unwrap();
        (connected, rx)
    }
}
