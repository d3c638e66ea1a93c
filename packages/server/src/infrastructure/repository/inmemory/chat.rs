//! InMemory Chat History Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatHistoryRepository, ChatRecord, MessageContent, ParticipantId, RepositoryError, RoomId,
    Timestamp,
};

#[derive(Default)]
struct ChatState {
    next_id: u64,
    records: HashMap<RoomId, Vec<ChatRecord>>,
}

/// インメモリ Chat History Repository 実装
#[derive(Default)]
pub struct InMemoryChatHistoryRepository {
    state: Mutex<ChatState>,
}

impl InMemoryChatHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatHistoryRepository for InMemoryChatHistoryRepository {
    async fn append(
        &self,
        room_id: &RoomId,
        sender: &ParticipantId,
        message: MessageContent,
        timestamp: Timestamp,
    ) -> Result<ChatRecord, RepositoryError> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let record = ChatRecord {
            id: state.next_id,
            room_id: room_id.clone(),
            sender: sender.clone(),
            message,
            timestamp,
        };
        state
            .records
            .entry(room_id.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn history(&self, room_id: &RoomId) -> Vec<ChatRecord> {
        let state = self.state.lock().await;
        let mut records = state.records.get(room_id).cloned().unwrap_or_default();
        records.sort_by_key(|record| (record.timestamp, record.id));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn alice() -> ParticipantId {
        ParticipantId::new("alice".to_string()).unwrap()
    }

    fn content(text: &str) -> MessageContent {
        MessageContent::new(text.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_history_is_ordered_by_timestamp() {
        // テスト項目: 履歴はタイムスタンプ順（同時刻は追加順）で返される
        // given (前提条件):
        let repo = InMemoryChatHistoryRepository::new();
        let room_id = room("room-1001");
        repo.append(&room_id, &alice(), content("late"), Timestamp::new(3000))
            .await
            .unwrap();
        repo.append(&room_id, &alice(), content("early"), Timestamp::new(1000))
            .await
            .unwrap();
        repo.append(&room_id, &alice(), content("early-2"), Timestamp::new(1000))
            .await
            .unwrap();

        // when (操作):
        let history = repo.history(&room_id).await;

        // then (期待する結果):
        let messages: Vec<&str> = history.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["early", "early-2", "late"]);
    }

    #[tokio::test]
    async fn test_history_is_scoped_per_room() {
        // テスト項目: 履歴はルームごとに分かれている
        // given (前提条件):
        let repo = InMemoryChatHistoryRepository::new();
        repo.append(&room("room-a"), &alice(), content("a"), Timestamp::new(1))
            .await
            .unwrap();

        // when (操作):
        let other = repo.history(&room("room-b")).await;

        // then (期待する結果):
        assert!(other.is_empty());
        assert_eq!(repo.history(&room("room-a")).await.len(), 1);
    }
}
