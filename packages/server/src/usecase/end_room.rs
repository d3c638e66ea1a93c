//! UseCase: ルーム終了処理
//!
//! ホストだけがルームを終了できます。終了したルームは非アクティブになり、
//! 接続中のコネクションは全て切り離されます（送信キューが閉じられ、
//! 各コネクションの送信タスクがソケットを閉じます）。

use std::sync::Arc;

use crate::{
    coordination::{ConnectionRegistry, RoomDirectory},
    domain::{MessagePusher, ParticipantId, Room, RoomId, RoomRepository},
};

use super::{disconnect_participant::release_locked, error::RoomError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndedRoom {
    pub room: Room,
    /// 切り離したコネクション数
    pub closed_connections: usize,
}

/// ルーム終了のユースケース
pub struct EndRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    registry: Arc<ConnectionRegistry>,
    directory: Arc<RoomDirectory>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl EndRoomUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        registry: Arc<ConnectionRegistry>,
        directory: Arc<RoomDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            room_repository,
            registry,
            directory,
            message_pusher,
        }
    }

    /// ルーム終了を実行
    ///
    /// 終了済みのルームに対しても成功します（切り離すコネクションは 0）。
    ///
    /// # Returns
    ///
    /// * `Err(RoomError::RoomNotFound)` - ルームが存在しない
    /// * `Err(RoomError::NotRoomHost)` - 要求者がホストではない
    pub async fn execute(
        &self,
        room_id: &RoomId,
        requester: &ParticipantId,
    ) -> Result<EndedRoom, RoomError> {
        let room = self.room_repository.find_room(room_id).await?;
        if !room.is_hosted_by(requester) {
            return Err(RoomError::NotRoomHost {
                room_id: room_id.as_str().to_string(),
                user_id: requester.as_str().to_string(),
            });
        }

        // 先に非アクティブにしてから切り離す（以降の接続は拒否される）
        let room = self.room_repository.deactivate_room(room_id).await?;
        let closed_connections = self.close_connections(room_id).await;

        tracing::info!(
            "Room '{}' ended by '{}', {} connection(s) closed",
            room_id,
            requester,
            closed_connections
        );

        Ok(EndedRoom {
            room,
            closed_connections,
        })
    }

    async fn close_connections(&self, room_id: &RoomId) -> usize {
        let Some(mut room) = self.directory.lock(room_id).await else {
            return 0;
        };
        let mut closed = 0;
        for handle in room.snapshot().into_vec() {
            if release_locked(
                &mut room,
                &self.registry,
                self.message_pusher.as_ref(),
                &handle,
            )
            .await
            .is_some()
            {
                closed += 1;
            }
        }
        closed
    }
}
