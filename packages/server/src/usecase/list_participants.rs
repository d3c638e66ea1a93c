//! UseCase: 参加者一覧取得

use std::sync::Arc;

use crate::domain::{Participant, RoomId, RoomRepository};

use super::error::RoomError;

/// 参加者一覧取得のユースケース
///
/// 終了済みのルームの参加者も取得できます。
pub struct ListParticipantsUseCase {
    room_repository: Arc<dyn RoomRepository>,
}

impl ListParticipantsUseCase {
    pub fn new(room_repository: Arc<dyn RoomRepository>) -> Self {
        Self { room_repository }
    }

    /// 参加順の参加者一覧
    pub async fn execute(&self, room_id: &RoomId) -> Result<Vec<Participant>, RoomError> {
        Ok(self.room_repository.list_participants(room_id).await?)
    }
}
