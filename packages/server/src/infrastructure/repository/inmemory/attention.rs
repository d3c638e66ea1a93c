//! InMemory Attention Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AttentionRepository, AttentionStats, AttentionUpdate, ParticipantId, RepositoryError, RoomId,
    Timestamp,
};

/// インメモリ Attention Repository 実装
///
/// Key: (RoomId, ParticipantId)
#[derive(Default)]
pub struct InMemoryAttentionRepository {
    stats: Mutex<HashMap<(RoomId, ParticipantId), AttentionStats>>,
}

impl InMemoryAttentionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttentionRepository for InMemoryAttentionRepository {
    async fn upsert(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
        update: AttentionUpdate,
        now: Timestamp,
    ) -> Result<AttentionStats, RepositoryError> {
        let mut stats = self.stats.lock().await;
        let entry = stats
            .entry((room_id.clone(), user_id.clone()))
            .and_modify(|existing| existing.apply(update, now))
            .or_insert_with(|| {
                AttentionStats::from_update(room_id.clone(), user_id.clone(), update, now)
            });
        Ok(entry.clone())
    }

    async fn find(&self, room_id: &RoomId, user_id: &ParticipantId) -> Option<AttentionStats> {
        let stats = self.stats.lock().await;
        stats.get(&(room_id.clone(), user_id.clone())).cloned()
    }
}
