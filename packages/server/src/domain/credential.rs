//! Media credential issuance.

use super::{error::CredentialError, value_object::RoomId};

/// Mints join tokens for the external media transport.
///
/// Called once per room creation or join, never on the relay path.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialIssuer: Send + Sync {
    fn mint_token(&self, room_id: &RoomId, participant_name: &str)
    -> Result<String, CredentialError>;

    /// URL clients use to reach the media transport.
    fn media_url(&self) -> String;
}
