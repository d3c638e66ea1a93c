//! UseCase: ルーム作成処理

use std::sync::Arc;

use kaigi_shared::time::Clock;

use crate::domain::{
    CredentialIssuer, DisplayName, ParticipantId, Room, RoomIdFactory, RoomRepository, Timestamp,
};

use super::error::RoomError;

/// ルーム作成の入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoomInput {
    pub name: String,
    pub host_name: String,
    /// ルーム ID の種（`room-{seed}`）。無ければ現在時刻を使う
    pub seed: Option<String>,
}

/// 作成されたルームとホスト用のメディアトークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoom {
    pub room: Room,
    pub media_url: String,
    pub token: String,
}

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    room_repository: Arc<dyn RoomRepository>,
    credential_issuer: Arc<dyn CredentialIssuer>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
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

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(CreatedRoom)` - 作成成功
    /// * `Err(RoomError::RoomAlreadyExists)` - 同じ ID のアクティブなルームがある
    /// * `Err(RoomError::Validation)` - 名前や ID が不正
    pub async fn execute(&self, input: CreateRoomInput) -> Result<CreatedRoom, RoomError> {
        let now = Timestamp::new(self.clock.now_millis());
        let room_id = match &input.seed {
            Some(seed) => RoomIdFactory::from_seed(seed)?,
            None => RoomIdFactory::from_timestamp(now)?,
        };
        let host = ParticipantId::new(input.host_name)?;
        let name = DisplayName::new(input.name)?;

        let room = self
            .room_repository
            .create_room(Room::new(room_id, name, host, now))
            .await?;
        let token = self
            .credential_issuer
            .mint_token(&room.id, room.host.as_str())?;

        tracing::info!("Room '{}' created by '{}'", room.id, room.host);

        Ok(CreatedRoom {
            room,
            media_url: self.credential_issuer.media_url(),
            token,
        })
    }
}
