//! UseCase: チャット履歴
//!
//! HTTP 経由で投稿されたチャットの保存と、ルームのチャット履歴の取得。
//! WebSocket で中継されるチャットはここを通りません。

use std::sync::Arc;

use kaigi_shared::time::Clock;

use crate::domain::{
    ChatHistoryRepository, ChatRecord, MessageContent, ParticipantId, RoomId, RoomRepository,
    Timestamp,
};

use super::error::RoomError;

/// チャット履歴のユースケース
pub struct ChatHistoryUseCase {
    room_repository: Arc<dyn RoomRepository>,
    chat_repository: Arc<dyn ChatHistoryRepository>,
    clock: Arc<dyn Clock>,
}

impl ChatHistoryUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        chat_repository: Arc<dyn ChatHistoryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_repository,
            chat_repository,
            clock,
        }
    }

    /// メッセージを保存
    ///
    /// 送信者はルームのホストか参加者である必要があります。
    pub async fn send(
        &self,
        room_id: &RoomId,
        sender: &ParticipantId,
        message: MessageContent,
    ) -> Result<ChatRecord, RoomError> {
        let room = self.room_repository.find_room(room_id).await?;
        if !room.is_hosted_by(sender) {
            self.room_repository
                .find_participant(room_id, sender)
                .await?;
        }

        let record = self
            .chat_repository
            .append(
                room_id,
                sender,
                message,
                Timestamp::new(self.clock.now_millis()),
            )
            .await?;
        tracing::debug!("Stored chat message {} in room '{}'", record.id, room_id);
        Ok(record)
    }

    /// タイムスタンプ順の履歴
    pub async fn history(&self, room_id: &RoomId) -> Result<Vec<ChatRecord>, RoomError> {
        self.room_repository.find_room(room_id).await?;
        Ok(self.chat_repository.history(room_id).await)
    }
}
