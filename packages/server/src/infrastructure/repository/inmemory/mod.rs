//! インメモリ Repository 実装

mod attention;
mod chat;
mod room;

pub use attention::InMemoryAttentionRepository;
pub use chat::InMemoryChatHistoryRepository;
pub use room::InMemoryRoomRepository;
