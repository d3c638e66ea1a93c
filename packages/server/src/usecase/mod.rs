//! UseCase 層
//!
//! アプリケーション固有のビジネスロジックを実装します。
//! ドメイン層の trait とコーディネーション層のレジストリにのみ依存し、
//! 具体的な実装（インメモリ DB・WebSocket）は UI 層で注入されます。

mod chat_history;
mod connect_participant;
mod create_room;
mod disconnect_participant;
mod end_room;
mod error;
mod join_room;
mod leave_room;
mod list_participants;
mod relay_signal;
mod room_presence;
mod update_attention;
mod update_media_state;

#[cfg(test)]
mod test_support;

pub use chat_history::ChatHistoryUseCase;
pub use connect_participant::{ConnectParticipantUseCase, ConnectedParticipant};
pub use create_room::{CreateRoomInput, CreateRoomUseCase, CreatedRoom};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use end_room::{EndRoomUseCase, EndedRoom};
pub use error::{ConnectError, RelayError, RoomError};
pub use join_room::{JoinRoomUseCase, JoinedRoom};
pub use leave_room::LeaveRoomUseCase;
pub use list_participants::ListParticipantsUseCase;
pub use relay_signal::{DeliveryReport, RelaySignalUseCase, RouteOutcome};
pub use room_presence::{PresenceEntry, RoomPresenceUseCase};
pub use update_attention::UpdateAttentionUseCase;
pub use update_media_state::UpdateMediaStateUseCase;
