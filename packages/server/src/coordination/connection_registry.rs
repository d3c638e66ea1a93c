//! Connection Registry
//!
//! Single source of truth for "who is this connection": maps a live
//! connection handle to the room and participant it was bound to at connect
//! time.

use dashmap::{DashMap, mapref::entry::Entry};

use crate::domain::{ConnectionBinding, ConnectionHandle, ParticipantId, RegistryError, RoomId};

/// Handle → (room, participant) bindings.
///
/// Backed by a sharded map so lookups from unrelated connections do not
/// contend on one lock.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    bindings: DashMap<ConnectionHandle, ConnectionBinding>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a new connection.
    ///
    /// # Errors
    ///
    /// `RegistryError::DuplicateConnection` if the handle is already bound.
    pub fn register(
        &self,
        handle: ConnectionHandle,
        room_id: RoomId,
        participant_id: ParticipantId,
    ) -> Result<(), RegistryError> {
        match self.bindings.entry(handle) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateConnection(handle)),
            Entry::Vacant(entry) => {
                entry.insert(ConnectionBinding {
                    room_id,
                    participant_id,
                });
                tracing::debug!("Connection '{}' registered", handle);
                Ok(())
            }
        }
    }

    /// Remove a binding. Unknown handles are a no-op.
    pub fn unregister(&self, handle: &ConnectionHandle) -> Option<ConnectionBinding> {
        let removed = self.bindings.remove(handle).map(|(_, binding)| binding);
        if removed.is_some() {
            tracing::debug!("Connection '{}' unregistered", handle);
        }
        removed
    }

    /// Look up what a connection is bound to.
    ///
    /// # Errors
    ///
    /// `RegistryError::UnknownConnection` if the handle is not bound.
    pub fn resolve(&self, handle: &ConnectionHandle) -> Result<ConnectionBinding, RegistryError> {
        self.bindings
            .get(handle)
            .map(|binding| binding.value().clone())
            .ok_or(RegistryError::UnknownConnection(*handle))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
