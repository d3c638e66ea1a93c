//! UseCase: ルームのライブ接続一覧（デバッグ用）

use std::sync::Arc;

use crate::{
    coordination::{ConnectionRegistry, RoomDirectory},
    domain::{ConnectionHandle, ParticipantId, RoomId},
};

/// 接続中のコネクションとその参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    pub handle: ConnectionHandle,
    pub participant_id: ParticipantId,
}

pub struct RoomPresenceUseCase {
    registry: Arc<ConnectionRegistry>,
    directory: Arc<RoomDirectory>,
}

impl RoomPresenceUseCase {
    pub fn new(registry: Arc<ConnectionRegistry>, directory: Arc<RoomDirectory>) -> Self {
        Self {
            registry,
            directory,
        }
    }

    /// 接続が無いルーム（未知のルームを含む）は空
    pub async fn execute(&self, room_id: &RoomId) -> Vec<PresenceEntry> {
        let members = self.directory.members_of(room_id).await;
        members
            .iter()
            .filter_map(|handle| {
                // スナップショット取得後に切断されたコネクションは除く
                self.registry.resolve(handle).ok().map(|binding| PresenceEntry {
                    handle: *handle,
                    participant_id: binding.participant_id,
                })
            })
            .collect()
    }

    /// 接続が 1 つ以上あるルーム
    pub fn live_rooms(&self) -> Vec<RoomId> {
        self.directory.room_ids()
    }
}
