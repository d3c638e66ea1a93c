//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - コネクションの紐付け（Registry）、送信キュー登録、ルームのメンバー追加
//!
//! ### なぜこのテストが必要か
//! - 存在しない・終了済みのルームに接続できないことを保証
//! - 重複したハンドルが既存の紐付けを上書きしないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：アクティブなルームへの接続
//! - 異常系：未知のルーム、終了済みのルーム、重複したハンドル

use std::sync::Arc;

use kaigi_shared::time::Clock;

use crate::{
    coordination::{ConnectionRegistry, RoomDirectory},
    domain::{
        ConnectionBinding, ConnectionHandle, MessagePusher, ParticipantId, PusherChannel, RoomId,
        RoomRepository, Timestamp,
    },
};

use super::{disconnect_participant::release_locked, error::ConnectError};

/// 接続に成功したコネクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedParticipant {
    pub handle: ConnectionHandle,
    pub binding: ConnectionBinding,
    pub connected_at: Timestamp,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（ルームが有効かの確認にのみ使用）
    room_repository: Arc<dyn RoomRepository>,
    registry: Arc<ConnectionRegistry>,
    directory: Arc<RoomDirectory>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        room_repository: Arc<dyn RoomRepository>,
        registry: Arc<ConnectionRegistry>,
        directory: Arc<RoomDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            room_repository,
            registry,
            directory,
            message_pusher,
            clock,
        }
    }

    /// 新しいハンドルを払い出して参加者接続を実行
    pub async fn execute(
        &self,
        room_id: RoomId,
        participant_id: ParticipantId,
        sender: PusherChannel,
    ) -> Result<ConnectedParticipant, ConnectError> {
        self.execute_with_handle(ConnectionHandle::generate(), room_id, participant_id, sender)
            .await
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `handle` - コネクションのハンドル
    /// * `room_id` - 接続先のルーム
    /// * `participant_id` - コネクションに紐付ける参加者
    /// * `sender` - コネクションへのメッセージ送信用キュー
    ///
    /// # Returns
    ///
    /// * `Ok(ConnectedParticipant)` - 接続成功
    /// * `Err(ConnectError)` - 接続失敗（何も登録されない）
    pub async fn execute_with_handle(
        &self,
        handle: ConnectionHandle,
        room_id: RoomId,
        participant_id: ParticipantId,
        sender: PusherChannel,
    ) -> Result<ConnectedParticipant, ConnectError> {
        // 1. ルームが有効か確認
        self.ensure_active(&room_id).await?;

        // 2. コネクションを紐付け
        self.registry
            .register(handle, room_id.clone(), participant_id.clone())
            .map_err(|_| ConnectError::DuplicateConnection(handle))?;

        // 3. 送信キューを登録してからメンバーに追加（追加された瞬間から配送対象になる）
        self.message_pusher.register_client(handle, sender).await;
        self.directory.add_member(&room_id, handle).await;

        // 4. 追加までの間にルームが終了していたら取り消す
        if let Err(e) = self.ensure_active(&room_id).await {
            if let Some(mut room) = self.directory.lock(&room_id).await {
                release_locked(
                    &mut room,
                    &self.registry,
                    self.message_pusher.as_ref(),
                    &handle,
                )
                .await;
            }
            return Err(e);
        }

        let connected_at = Timestamp::new(self.clock.now_millis());
        tracing::info!(
            "Connection '{}' of '{}' joined room '{}'",
            handle,
            participant_id,
            room_id
        );

        Ok(ConnectedParticipant {
            handle,
            binding: ConnectionBinding {
                room_id,
                participant_id,
            },
            connected_at,
        })
    }

    async fn ensure_active(&self, room_id: &RoomId) -> Result<(), ConnectError> {
        self.room_repository
            .find_active_room(room_id)
            .await
            .map(|_| ())
            .map_err(|_| ConnectError::RoomNotFound(room_id.as_str().to_string()))
    }
}
