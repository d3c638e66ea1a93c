//! MessagePusher trait 定義
//!
//! クライアントへのメッセージ送信（通知）のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, value_object::ConnectionHandle};

/// コネクションごとの送信キュー（有界）の送信側
pub type PusherChannel = mpsc::Sender<String>;

/// コネクションごとの送信キュー（有界）の受信側
pub type PusherReceiver = mpsc::Receiver<String>;

/// 配送に失敗した宛先とその理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub handle: ConnectionHandle,
    pub error: MessagePushError,
}

/// MessagePusher trait
///
/// ## 配送の保証
///
/// - 宛先ごとの送信キューは FIFO
/// - 宛先ごとの失敗は独立しており、他の宛先への配送を止めない
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// コネクションの送信キューを登録
    async fn register_client(&self, handle: ConnectionHandle, sender: PusherChannel);

    /// コネクションの送信キューを登録解除（未登録なら何もしない）
    async fn unregister_client(&self, handle: &ConnectionHandle);

    /// 特定のコネクションに送信
    async fn push_to(&self, handle: &ConnectionHandle, content: &str)
    -> Result<(), MessagePushError>;

    /// 複数のコネクションに送信し、失敗した宛先を返す
    async fn broadcast(&self, targets: &[ConnectionHandle], content: &str) -> Vec<DeliveryFailure>;
}
