//! The mansion: a read-only binary tree of rooms.
//!
//! Rooms live in an arena and refer to their children by [`RoomId`]. Once
//! built from a [`CaseFile`], a mansion never changes.

use std::collections::HashMap;
use std::ops::Index;

use crate::bounded;
use crate::case::{CaseError, CaseFile};
use crate::clues::MAX_CLUE_LEN;

/// Maximum stored length of a room name, in bytes.
pub const MAX_ROOM_NAME_LEN: usize = 63;

/// Stable handle to a room inside one [`Mansion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomId(usize);

/// A room of the mansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    clue: Option<String>,
    left: Option<RoomId>,
    right: Option<RoomId>,
}

impl Room {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The clue found here, if the room has one.
    pub fn clue(&self) -> Option<&str> {
        self.clue.as_deref()
    }

    pub fn left(&self) -> Option<RoomId> {
        self.left
    }

    pub fn right(&self) -> Option<RoomId> {
        self.right
    }

    /// A room with no way forward.
    pub fn is_dead_end(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The whole house.
#[derive(Debug, Clone)]
pub struct Mansion {
    rooms: Vec<Room>,
    entrance: RoomId,
}

impl Mansion {
    /// Build and validate the mansion described by `case`.
    ///
    /// The layout must form a single binary tree rooted at the entrance:
    /// every link resolves, no room has two parents, and every room can be
    /// reached from the entrance.
    pub fn from_case(case: &CaseFile) -> Result<Self, CaseError> {
        if case.rooms.is_empty() {
            return Err(CaseError::NoRooms);
        }

        let mut ids: HashMap<&str, RoomId> = HashMap::new();
        for (position, room_spec) in case.rooms.iter().enumerate() {
            let name = bounded(room_spec.name.trim(), MAX_ROOM_NAME_LEN);
            if name.is_empty() {
                return Err(CaseError::EmptyRoomName);
            }
            if ids.insert(name, RoomId(position)).is_some() {
                return Err(CaseError::DuplicateRoom(name.to_string()));
            }
        }

        let resolve = |from: &str, to: &Option<String>| -> Result<Option<RoomId>, CaseError> {
            match to {
                None => Ok(None),
                Some(to) => ids
                    .get(bounded(to.trim(), MAX_ROOM_NAME_LEN))
                    .copied()
                    .map(Some)
                    .ok_or_else(|| CaseError::UnknownRoom {
                        from: from.to_string(),
                        to: to.clone(),
                    }),
            }
        };

        let mut rooms = Vec::with_capacity(case.rooms.len());
        for room_spec in &case.rooms {
            let name = bounded(room_spec.name.trim(), MAX_ROOM_NAME_LEN);
            let clue = room_spec
                .clue
                .as_deref()
                .map(|clue| bounded(clue, MAX_CLUE_LEN))
                .filter(|clue| !clue.trim().is_empty())
                .map(str::to_string);
            rooms.push(Room {
                name: name.to_string(),
                clue,
                left: resolve(name, &room_spec.left)?,
                right: resolve(name, &room_spec.right)?,
            });
        }

        let entrance = ids
            .get(bounded(case.entrance.trim(), MAX_ROOM_NAME_LEN))
            .copied()
            .ok_or_else(|| CaseError::UnknownEntrance(case.entrance.clone()))?;

        // The entrance counts as entered from outside, so any link back into
        // it is a second path.
        let mut parents = vec![0usize; rooms.len()];
        parents[entrance.0] = 1;
        for room in &rooms {
            for child in [room.left, room.right].into_iter().flatten() {
                parents[child.0] += 1;
                if parents[child.0] > 1 {
                    return Err(CaseError::SharedRoom(rooms[child.0].name.clone()));
                }
            }
        }

        let mansion = Self { rooms, entrance };
        let mut reached = vec![false; mansion.rooms.len()];
        let mut pending = vec![entrance];
        while let Some(id) = pending.pop() {
            reached[id.0] = true;
            let room = &mansion[id];
            pending.extend(room.left);
            pending.extend(room.right);
        }
        if let Some(position) = reached.iter().position(|seen| !seen) {
            return Err(CaseError::UnreachableRoom(mansion.rooms[position].name.clone()));
        }

        Ok(mansion)
    }

    /// Where exploration begins.
    pub fn entrance(&self) -> RoomId {
        self.entrance
    }

    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    /// Look a room up by name.
    pub fn find(&self, name: &str) -> Option<RoomId> {
        self.rooms
            .iter()
            .position(|room| room.name == name)
            .map(RoomId)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl Index<RoomId> for Mansion {
    type Output = Room;

    /// Panics if `id` came from a different mansion.
    fn index(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }
}
