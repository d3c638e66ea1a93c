//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - ルームのメンバー集合・Connection Registry・MessagePusher からの削除
//!
//! ### なぜこのテストが必要か
//! - 切断後のコネクションに配送されないことを保証
//! - 最後の参加者が抜けたルームがディレクトリから消えることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中の参加者の切断
//! - エッジケース：同じコネクションの二重切断
//! - 異常系：存在しないコネクションの切断（何もしない）

use std::sync::Arc;

use crate::{
    coordination::{ConnectionRegistry, RoomDirectory, RoomGuard},
    domain::{ConnectionBinding, ConnectionHandle, MessagePusher},
};

/// ルームのロックを保持したまま、コネクションを全ての登録先から外す
///
/// 中継処理も同じロックの下で配送するため、ここで外したコネクションに
/// 後から配送されることはありません。
pub(crate) async fn release_locked(
    room: &mut RoomGuard,
    registry: &ConnectionRegistry,
    message_pusher: &dyn MessagePusher,
    handle: &ConnectionHandle,
) -> Option<ConnectionBinding> {
    room.remove(handle);
    let binding = registry.unregister(handle);
    message_pusher.unregister_client(handle).await;
    binding
}

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<ConnectionRegistry>,
    directory: Arc<RoomDirectory>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        directory: Arc<RoomDirectory>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            directory,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(ConnectionBinding)` - このコールで切断したコネクションの紐付け
    /// * `None` - 既に切断済み、または未知のコネクション
    pub async fn execute(&self, handle: &ConnectionHandle) -> Option<ConnectionBinding> {
        let binding = self.registry.resolve(handle).ok()?;

        let released = match self.directory.lock(&binding.room_id).await {
            Some(mut room) => {
                release_locked(
                    &mut room,
                    &self.registry,
                    self.message_pusher.as_ref(),
                    handle,
                )
                .await
            }
            // メンバー集合に入る前の接続途中のコネクション
            None => {
                let released = self.registry.unregister(handle);
                self.message_pusher.unregister_client(handle).await;
                released
            }
        };

        if let Some(binding) = &released {
            tracing::info!(
                "Connection '{}' of '{}' left room '{}'",
                handle,
                binding.participant_id,
                binding.room_id
            );
        }
        released
    }
}
