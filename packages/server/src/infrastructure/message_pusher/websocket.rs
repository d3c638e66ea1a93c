//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - コネクションごとの有界送信キュー（`mpsc::Sender`）を管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成されたキューの送信側を受け取り、メッセージ送信に使用します。
//!
//! ## 溢れたときの方針（disconnect-on-overflow）
//!
//! 送信キューが満杯のコネクションは遅い受信者とみなし、送信側を破棄します。
//! キューを消化し終えた送信タスクはソケットを閉じ、通常の切断処理が走ります。
//! 一度破棄されたコネクションへの以降の送信は `ClientNotFound` になります。

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::{
    ConnectionHandle, DeliveryFailure, MessagePushError, MessagePusher, PusherChannel,
    PusherReceiver,
};

/// 送信キューの既定の容量
pub const DEFAULT_OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// コネクション用の有界送信キューを作成（容量 0 は 1 に切り上げ）
pub fn outbound_channel(capacity: usize) -> (PusherChannel, PusherReceiver) {
    mpsc::channel(capacity.max(1))
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// let (tx, rx) = outbound_channel(DEFAULT_OUTBOUND_QUEUE_CAPACITY);
/// pusher.register_client(handle, tx).await;
///
/// pusher.push_to(&handle, "{\"type\":\"chat_message\",...}").await?;
/// ```
#[derive(Debug, Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のコネクションの送信キュー
    ///
    /// Key: ConnectionHandle
    /// Value: PusherChannel
    clients: DashMap<ConnectionHandle, PusherChannel>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録中のコネクション数
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    fn drop_client(&self, handle: &ConnectionHandle) {
        self.clients.remove(handle);
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, handle: ConnectionHandle, sender: PusherChannel) {
        self.clients.insert(handle, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", handle);
    }

    async fn unregister_client(&self, handle: &ConnectionHandle) {
        if self.clients.remove(handle).is_some() {
            tracing::debug!("Connection '{}' unregistered from MessagePusher", handle);
        }
    }

    async fn push_to(
        &self,
        handle: &ConnectionHandle,
        content: &str,
    ) -> Result<(), MessagePushError> {
        // DashMap の参照を保持したまま remove するとデッドロックするため、先に複製する
        let sender = self.clients.get(handle).map(|entry| entry.value().clone());
        let Some(sender) = sender else {
            return Err(MessagePushError::ClientNotFound(handle.to_string()));
        };

        match sender.try_send(content.to_string()) {
            Ok(()) => {
                tracing::debug!("Pushed message to connection '{}'", handle);
                Ok(())
            }
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    "Outbound queue of connection '{}' is full, disconnecting it",
                    handle
                );
                self.drop_client(handle);
                Err(MessagePushError::QueueFull(handle.to_string()))
            }
            Err(TrySendError::Closed(_)) => {
                self.drop_client(handle);
                Err(MessagePushError::ChannelClosed(handle.to_string()))
            }
        }
    }

    async fn broadcast(&self, targets: &[ConnectionHandle], content: &str) -> Vec<DeliveryFailure> {
        let mut failures = Vec::new();
        for handle in targets {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(error) = self.push_to(handle, content).await {
                tracing::warn!("Failed to push message to connection '{}': {}", handle, error);
                failures.push(DeliveryFailure {
                    handle: *handle,
                    error,
                });
            }
        }
        failures
    }
}
