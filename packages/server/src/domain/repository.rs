//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ルーム・参加者・チャット履歴・アテンション統計はリレーのホットパスからは
//! 参照されません。ここで定義する trait は HTTP 経由の呼び出し元（参加・作成
//! など）と WebSocket 接続時のルーム存在確認からのみ使われます。

use async_trait::async_trait;

use super::{
    AttentionStats, AttentionUpdate, ChatRecord, MediaStateUpdate, MessageContent, Participant,
    ParticipantId, RepositoryError, Room, RoomId, Timestamp,
};

/// Room Repository trait
///
/// ルームと参加者の永続化サービスへのインターフェース。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを作成（アクティブなルームと ID が重複する場合はエラー）
    async fn create_room(&self, room: Room) -> Result<Room, RepositoryError>;

    /// ルームを取得（非アクティブなルームも含む）
    async fn find_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// アクティブなルームを取得
    async fn find_active_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// ルームを非アクティブにする
    async fn deactivate_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    /// 参加者を追加（既に参加済みなら既存のレコードを返す）
    async fn join_room(&self, participant: Participant) -> Result<Participant, RepositoryError>;

    /// 参加者を削除（参加していない場合は何もしない）
    async fn leave_room(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
    ) -> Result<(), RepositoryError>;

    /// 参加者を取得
    async fn find_participant(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
    ) -> Result<Participant, RepositoryError>;

    /// ルームの参加者リストを参加順で取得
    async fn list_participants(&self, room_id: &RoomId) -> Result<Vec<Participant>, RepositoryError>;

    /// 参加者のメディア状態（ミュート・ビデオオフ）を更新
    async fn update_media_state(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
        update: MediaStateUpdate,
    ) -> Result<Participant, RepositoryError>;
}

/// Chat History Repository trait
///
/// リレーがライブ配信するチャットとは独立に、履歴を記録する。
#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    /// メッセージを追加
    async fn append(
        &self,
        room_id: &RoomId,
        sender: &ParticipantId,
        message: MessageContent,
        timestamp: Timestamp,
    ) -> Result<ChatRecord, RepositoryError>;

    /// ルームの履歴をタイムスタンプ順で取得
    async fn history(&self, room_id: &RoomId) -> Vec<ChatRecord>;
}

/// Attention Repository trait
#[async_trait]
pub trait AttentionRepository: Send + Sync {
    /// 統計を作成または更新
    async fn upsert(
        &self,
        room_id: &RoomId,
        user_id: &ParticipantId,
        update: AttentionUpdate,
        now: Timestamp,
    ) -> Result<AttentionStats, RepositoryError>;

    /// 統計を取得
    async fn find(&self, room_id: &RoomId, user_id: &ParticipantId) -> Option<AttentionStats>;
}
