//! HTTP / WebSocket handlers.

mod error;
mod http;
mod websocket;

pub use http::{
    create_room, debug_live_rooms, debug_room_connections, end_room, get_messages,
    get_participants, health_check, join_room, leave_room, send_message, update_attention,
    update_media_state,
};
pub use websocket::websocket_handler;
