//! Room Directory
//!
//! Maps a room identifier to the set of currently connected handles. Each
//! room is an independent shard guarded by its own lock; unrelated rooms
//! never contend.
//!
//! A room entry exists only while it has members. Removing the last member
//! retires the shard and drops it from the directory; a concurrent writer
//! that still holds the retired shard notices the flag after acquiring the
//! lock and retries against a fresh one.

use std::{collections::BTreeSet, sync::Arc};

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{ConnectionHandle, RoomId};

#[derive(Debug, Default)]
struct RoomMembers {
    handles: BTreeSet<ConnectionHandle>,
    retired: bool,
}

type RoomShard = Arc<Mutex<RoomMembers>>;
type RoomShards = Arc<DashMap<RoomId, RoomShard>>;

/// Point-in-time copy of a room's member handles.
///
/// Finite and restartable: iterate it as many times as needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSnapshot {
    handles: Vec<ConnectionHandle>,
}

impl MemberSnapshot {
    pub fn iter(&self) -> std::slice::Iter<'_, ConnectionHandle> {
        self.handles.iter()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, handle: &ConnectionHandle) -> bool {
        self.handles.binary_search(handle).is_ok()
    }

    pub fn into_vec(self) -> Vec<ConnectionHandle> {
        self.handles
    }
}

impl<'a> IntoIterator for &'a MemberSnapshot {
    type Item = &'a ConnectionHandle;
    type IntoIter = std::slice::Iter<'a, ConnectionHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Exclusive access to one room's member set.
///
/// While a guard is alive no other task can add or remove members of that
/// room. The relay delivers and the teardown path unbinds under this guard.
pub struct RoomGuard {
    room_id: RoomId,
    shard: RoomShard,
    members: OwnedMutexGuard<RoomMembers>,
    rooms: RoomShards,
}

impl RoomGuard {
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn contains(&self, handle: &ConnectionHandle) -> bool {
        self.members.handles.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.members.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.handles.is_empty()
    }

    pub fn snapshot(&self) -> MemberSnapshot {
        MemberSnapshot {
            handles: self.members.handles.iter().copied().collect(),
        }
    }

    /// Remove a member; drops the room entry once it is empty.
    pub fn remove(&mut self, handle: &ConnectionHandle) -> bool {
        let removed = self.members.handles.remove(handle);
        if self.members.handles.is_empty() && !self.members.retired {
            self.members.retired = true;
            self.rooms
                .remove_if(&self.room_id, |_, shard| Arc::ptr_eq(shard, &self.shard));
            tracing::debug!("Room '{}' has no members left, dropped", self.room_id);
        }
        removed
    }
}

/// Room identifier → connected member handles.
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: RoomShards,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, creating the room entry on first member.
    ///
    /// Returns `false` when the handle was already a member.
    pub async fn add_member(&self, room_id: &RoomId, handle: ConnectionHandle) -> bool {
        loop {
            let shard = self.rooms.entry(room_id.clone()).or_default().value().clone();
            let mut members = shard.lock().await;
            if members.retired {
                continue;
            }
            let inserted = members.handles.insert(handle);
            if inserted {
                tracing::debug!(
                    "Connection '{}' joined room '{}' ({} members)",
                    handle,
                    room_id,
                    members.handles.len()
                );
            }
            return inserted;
        }
    }

    /// Remove a member. Removing a non-member is a no-op.
    ///
    /// Returns `true` when the handle was a member.
    pub async fn remove_member(&self, room_id: &RoomId, handle: &ConnectionHandle) -> bool {
        match self.lock(room_id).await {
            Some(mut room) => room.remove(handle),
            None => false,
        }
    }

    /// Consistent snapshot of the current members (empty for unknown rooms).
    pub async fn members_of(&self, room_id: &RoomId) -> MemberSnapshot {
        match self.lock(room_id).await {
            Some(room) => room.snapshot(),
            None => MemberSnapshot::default(),
        }
    }

    /// Lock a room's member set. `None` when the room has no members.
    pub async fn lock(&self, room_id: &RoomId) -> Option<RoomGuard> {
        loop {
            let shard = self.rooms.get(room_id)?.value().clone();
            let members = Arc::clone(&shard).lock_owned().await;
            if members.retired {
                continue;
            }
            return Some(RoomGuard {
                room_id: room_id.clone(),
                shard,
                members,
                rooms: Arc::clone(&self.rooms),
            });
        }
    }

    /// Rooms that currently have at least one member.
    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut room_ids: Vec<RoomId> = self.rooms.iter().map(|entry| entry.key().clone()).collect();
        room_ids.sort();
        room_ids
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
