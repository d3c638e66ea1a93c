//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ルームは削除されず、ホストが終了すると非アクティブになるだけです。
//! 参加者は参加順（Vec の順序）で保持します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    MediaStateUpdate, Participant, ParticipantId, RepositoryError, Room, RoomId, RoomRepository,
};

struct RoomRecord {
    room: Room,
    participants: Vec<Participant>,
}

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, RoomRecord>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

fn room_not_found(room_id: &RoomId) -> RepositoryError {
    RepositoryError::RoomNotFound(room_id.as_str().to_string())
}

fn participant_not_found(room_id: &RoomId, user_id: &ParticipantId) -> RepositoryError {
    RepositoryError::ParticipantNotFound {
        room_id: room_id.as_str().to_string(),
        user_id: user_id.as_str().to_string(),
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self, room: Room) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if let Some(existing) = rooms.get(&room.id)
            && existing.room.is_active
        {
            return Err(RepositoryError::RoomAlreadyExists(
                room.id.as_str().to_string(),
            ));
        }
        // 非アクティブなルームの ID は再利用できる（過去の参加者は引き継がない）
        rooms.insert(
            room.id.clone(),
            RoomRecord {
                room: room.clone(),
                participants: Vec::new(),
            },
        );
        Ok(room)
    }

    async fn find_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|record| record.room.clone())
            .ok_or_else(|| room_not_found(room_id))
    }

    async fn find_active_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .filter(|record| record.room.is_active)
            .map(|record| record.room.clone())
            .ok_or_else(|| room_not_found(room_id))
    }

    async fn deactivate_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let record = rooms
            .get_mut(room_id)
            .ok_or_else(|| room_not_found(room_id))?;
        record.room.deactivate();
        Ok(record.room.clone())
    }

    async fn join_room(&self, participant: Participant) -> Result<Participant, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let record = rooms
            .get_mut(&participant.room_id)
            .filter(|record| record.room.is_active)
            .ok_or_else(|| room_not_found(&participant.room_id))?;

        if let Some(existing) = record
            .participants
            .iter()
            .find(|p| p.user_id == participant.user_id)
        {
            return Ok(existing.clone());
        }
        record.participants.push(participant.clone());
        Ok(participant)
    }

    async fn leave_room(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let record = rooms
            .get_mut(room_id)
            .ok_or_else(|| room_not_found(room_id))?;
        record.participants.retain(|p| &p.user_id != user_id);
        Ok(())
    }

    async fn find_participant(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
    ) -> Result<Participant, RepositoryError> {
        let rooms = self.rooms.lock().await;
        let record = rooms.get(room_id).ok_or_else(|| room_not_found(room_id))?;
        record
            .participants
            .iter()
            .find(|p| &p.user_id == user_id)
            .cloned()
            .ok_or_else(|| participant_not_found(room_id, user_id))
    }

    async fn list_participants(&self, room_id: &RoomId) -> Result<Vec<Participant>, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|record| record.participants.clone())
            .ok_or_else(|| room_not_found(room_id))
    }

    async fn update_media_state(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
        update: MediaStateUpdate,
    ) -> Result<Participant, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let record = rooms
            .get_mut(room_id)
            .ok_or_else(|| room_not_found(room_id))?;
        let participant = record
            .participants
            .iter_mut()
            .find(|p| &p.user_id == user_id)
            .ok_or_else(|| participant_not_found(room_id, user_id))?;
        participant.apply_media_state(update);
        Ok(participant.clone())
    }
}
