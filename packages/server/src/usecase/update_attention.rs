//! UseCase: 集中度テレメトリの更新

use std::sync::Arc;

use kaigi_shared::time::Clock;

use crate::domain::{
    AttentionRepository, AttentionStats, AttentionUpdate, ParticipantId, RoomId, RoomRepository,
    Timestamp,
};

use super::error::RoomError;

/// 集中度テレメトリ更新のユースケース
///
/// 参加者ごとの集計を upsert します。初回は未指定の項目が既定値
/// （スコア 100、時間 0）になり、以降は指定した項目だけが更新されます。
pub struct UpdateAttentionUseCase {
    room_repository: Arc<dyn RoomRepository>,
    attention_repository: Arc<dyn AttentionRepository>,
    clock: Arc<dyn Clock>,
}

impl UpdateAttentionUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        attention_repository: Arc<dyn AttentionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_repository,
            attention_repository,
            clock,
        }
    }

    /// # Returns
    ///
    /// * `Err(RoomError::RoomNotFound)` / `Err(RoomError::ParticipantNotFound)` -
    ///   ルームまたは参加者が存在しない
    pub async fn execute(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
        update: AttentionUpdate,
    ) -> Result<AttentionStats, RoomError> {
        self.room_repository
            .find_participant(room_id, user_id)
            .await?;
        let stats = self
            .attention_repository
            .upsert(
                room_id,
                user_id,
                update,
                Timestamp::new(self.clock.now_millis()),
            )
            .await?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, Participant},
        infrastructure::repository::InMemoryAttentionRepository,
        usecase::test_support::{FIXED_NOW, clock, participant, repository_with_room, room_id},
    };

    async fn usecase_with_participant(name: &str) -> UpdateAttentionUseCase {
        let repository = repository_with_room("room-1001", "alice").await;
        repository
            .join_room(Participant::new(
                room_id("room-1001"),
                participant(name),
                DisplayName::new(name.to_string()).unwrap(),
                Timestamp::new(0),
            ))
            .await
            .unwrap();
        UpdateAttentionUseCase::new(
            repository,
            Arc::new(InMemoryAttentionRepository::new()),
            clock(),
        )
    }

    #[tokio::test]
    async fn test_first_update_uses_defaults() {
        // テスト項目: 初回の更新では未指定の項目が既定値になる
        // given (前提条件):
        let usecase = usecase_with_participant("bob").await;

        // when (操作):
        let stats = usecase
            .execute(
                &room_id("room-1001"),
                &participant("bob"),
                AttentionUpdate {
                    focused_time: Some(30),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(stats.attention_score, 100);
        assert_eq!(stats.total_time, 0);
        assert_eq!(stats.focused_time, 30);
        assert_eq!(stats.updated_at, Timestamp::new(FIXED_NOW));
    }

    #[tokio::test]
    async fn test_update_for_non_participant_fails() {
        // テスト項目: 参加していないユーザーの更新は ParticipantNotFound
        // given (前提条件):
        let usecase = usecase_with_participant("bob").await;

        // when (操作):
        let result = usecase
            .execute(
                &room_id("room-1001"),
                &participant("carol"),
                AttentionUpdate::default(),
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomError::ParticipantNotFound {
                room_id: "room-1001".to_string(),
                user_id: "carol".to_string(),
            })
        );
    }
}
