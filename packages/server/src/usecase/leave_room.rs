//! UseCase: ルーム退出処理
//!
//! 参加者レコードを削除します。ライブ接続はここでは切らず、
//! ソケットが閉じたときの切断処理に任せます。

use std::sync::Arc;

use crate::domain::{ParticipantId, RoomId, RoomRepository};

use super::error::RoomError;

pub struct LeaveRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
}

impl LeaveRoomUseCase {
    pub fn new(room_repository: Arc<dyn RoomRepository>) -> Self {
        Self { room_repository }
    }

    /// 退出を実行。参加していないユーザーの退出も成功する
    pub async fn execute(&self, room_id: &RoomId, user_id: &ParticipantId) -> Result<(), RoomError> {
        self.room_repository.leave_room(room_id, user_id).await?;
        tracing::info!("'{}' left room '{}'", user_id, room_id);
        Ok(())
    }
}
