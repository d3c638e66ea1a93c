//! UseCase: 参加者のメディア状態（ミュート・ビデオオフ）の更新

use std::sync::Arc;

use crate::domain::{MediaStateUpdate, Participant, ParticipantId, RoomId, RoomRepository};

use super::error::RoomError;

pub struct UpdateMediaStateUseCase {
    room_repository: Arc<dyn RoomRepository>,
}

impl UpdateMediaStateUseCase {
    pub fn new(room_repository: Arc<dyn RoomRepository>) -> Self {
        Self { room_repository }
    }

    pub async fn execute(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
        update: MediaStateUpdate,
    ) -> Result<Participant, RoomError> {
        let participant = self
            .room_repository
            .update_media_state(room_id, user_id, update)
            .await?;
        tracing::debug!(
            "Media state of '{}' in room '{}': muted={}, video_off={}",
            user_id,
            room_id,
            participant.is_muted,
            participant.is_video_off
        );
        Ok(participant)
    }
}
