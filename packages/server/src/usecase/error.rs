//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{
    ConnectionHandle, CredentialError, EnvelopeError, RepositoryError, ValueObjectError,
};

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// ルームが存在しない、または終了済み
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    /// 同じハンドルが既に接続済み
    #[error("Connection '{0}' is already bound")]
    DuplicateConnection(ConnectionHandle),
}

/// シグナル中継のエラー
///
/// どちらもルームにとって致命的ではなく、送信元に返されるだけです。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// 送信元のコネクションがどのルームにも紐付いていない
    #[error("Connection '{0}' is not bound to any room")]
    UnboundConnection(ConnectionHandle),

    /// フレームがエンベロープとして不正
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(#[from] EnvelopeError),
}

/// ルーム操作（作成・参加・終了・履歴など）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Room '{0}' already exists")]
    RoomAlreadyExists(String),

    #[error("Participant '{user_id}' not found in room '{room_id}'")]
    ParticipantNotFound { room_id: String, user_id: String },

    /// ホスト以外がルームを終了しようとした
    #[error("'{user_id}' is not the host of room '{room_id}'")]
    NotRoomHost { room_id: String, user_id: String },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValueObjectError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}

impl From<RepositoryError> for RoomError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(room_id) => Self::RoomNotFound(room_id),
            RepositoryError::RoomAlreadyExists(room_id) => Self::RoomAlreadyExists(room_id),
            RepositoryError::ParticipantNotFound { room_id, user_id } => {
                Self::ParticipantNotFound { room_id, user_id }
            }
        }
    }
}
