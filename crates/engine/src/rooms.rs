//! Room records.
//!
//! `occupants` is a materialized index over `Resident::room_number`. Only the
//! occupancy reconciler writes it; everything outside this crate sees rooms
//! through shared references handed out by the engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Vacant,
    Occupied,
    /// Manual override. A room under maintenance admits no new occupants.
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vacant => "vacant",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }
}

impl TryFrom<&str> for RoomStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "vacant" => Ok(Self::Vacant),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(EngineError::Validation(format!(
                "invalid room status: {other}"
            ))),
        }
    }
}

/// A physical unit with a fixed bed capacity, keyed by its human-facing
/// number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub number: String,
    pub capacity: u32,
    pub(crate) occupants: Vec<Uuid>,
    pub(crate) status: RoomStatus,
}

impl Room {
    pub fn new(number: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            capacity,
            occupants: Vec::new(),
            status: RoomStatus::Vacant,
        }
    }

    pub fn occupants(&self) -> &[Uuid] {
        &self.occupants
    }

    pub fn status(&self) -> RoomStatus {
        self.status
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() as u32 >= self.capacity
    }

    pub fn has_occupant(&self, resident_id: Uuid) -> bool {
        self.occupants.contains(&resident_id)
    }

    /// Recompute occupancy-derived status. Maintenance is sticky: the
    /// reconciler never clears a manual override.
    pub(crate) fn refresh_status(&mut self) {
        if self.status == RoomStatus::Maintenance {
            return;
        }
        self.status = if self.is_full() {
            RoomStatus::Occupied
        } else {
            RoomStatus::Vacant
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_is_vacant() {
        let room = Room::new("101", 2);
        assert_eq!(room.status(), RoomStatus::Vacant);
        assert!(room.occupants().is_empty());
        assert!(!room.is_full());
    }

    #[test]
    fn full_when_occupants_reach_capacity() {
        let mut room = Room::new("101", 1);
        room.occupants.push(Uuid::new_v4());
        assert!(room.is_full());
        room.refresh_status();
        assert_eq!(room.status(), RoomStatus::Occupied);
    }

    #[test]
    fn refresh_keeps_maintenance() {
        let mut room = Room::new("101", 2);
        room.status = RoomStatus::Maintenance;
        room.refresh_status();
        assert_eq!(room.status(), RoomStatus::Maintenance);
    }

    #[test]
    fn status_round_trips_from_str() {
        for status in [RoomStatus::Vacant, RoomStatus::Occupied, RoomStatus::Maintenance] {
            assert_eq!(RoomStatus::try_from(status.as_str()).unwrap(), status);
        }
        assert!(RoomStatus::try_from("closed").is_err());
    }
}
