//! In-memory room coordination state.
//!
//! - `ConnectionRegistry`: connection handle → (room, participant)
//! - `RoomDirectory`: room → connected handles, one lock per room
//!
//! Both start empty on process start and are repopulated as clients
//! reconnect.

pub mod connection_registry;
pub mod room_directory;

pub use connection_registry::ConnectionRegistry;
pub use room_directory::{MemberSnapshot, RoomDirectory, RoomGuard};
