//! UseCase: ルーム参加処理
//!
//! 参加者レコードは get-or-create です。同じ名前で再参加すると最初の
//! 参加レコードがそのまま返り、新しいメディアトークンだけが発行されます。

use std::sync::Arc;

use kaigi_shared::time::Clock;

use crate::domain::{
    CredentialIssuer, DisplayName, Participant, ParticipantId, Room, RoomId, RoomRepository,
    Timestamp,
};

use super::error::RoomError;

/// 参加結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRoom {
    pub room: Room,
    pub participant: Participant,
    /// 参加順の全参加者（自分を含む）
    pub participants: Vec<Participant>,
    pub media_url: String,
    pub token: String,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    credential_issuer: Arc<dyn CredentialIssuer>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        credential_issuer: Arc<dyn CredentialIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_repository,
            credential_issuer,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 参加するルーム
    /// * `name` - 参加者名（ユーザー ID と表示名を兼ねる）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinedRoom)` - 参加成功
    /// * `Err(RoomError::RoomNotFound)` - ルームが存在しない、または終了済み
    pub async fn execute(&self, room_id: RoomId, name: String) -> Result<JoinedRoom, RoomError> {
        let user_id = ParticipantId::new(name.clone())?;
        let display_name = DisplayName::new(name)?;

        let room = self.room_repository.find_active_room(&room_id).await?;
        let participant = self
            .room_repository
            .join_room(Participant::new(
                room.id.clone(),
                user_id,
                display_name,
                Timestamp::new(self.clock.now_millis()),
            ))
            .await?;
        let participants = self.room_repository.list_participants(&room.id).await?;
        let token = self
            .credential_issuer
            .mint_token(&room.id, participant.user_id.as_str())?;

        tracing::info!("'{}' joined room '{}'", participant.user_id, room.id);

        Ok(JoinedRoom {
            room,
            participant,
            participants,
            media_url: self.credential_issuer.media_url(),
            token,
        })
    }
}
