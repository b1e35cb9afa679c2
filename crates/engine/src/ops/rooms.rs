use uuid::Uuid;

use crate::{
    Collection, Engine, EngineError, MessFeeConfig, ResultEngine, Room, RoomStatus, UpdateRoom,
};

use super::normalize_required_text;

impl Engine {
    /// Register a new room with the given bed capacity.
    pub fn add_room(&mut self, number: &str, capacity: u32) -> ResultEngine<Uuid> {
        let number = normalize_required_text(number, "room number")?;
        if capacity == 0 {
            return Err(EngineError::Validation(
                "room capacity must be > 0".to_string(),
            ));
        }
        if self.rooms.iter().any(|room| room.number == number) {
            return Err(EngineError::Validation(format!(
                "room {number} already exists"
            )));
        }

        let room = Room::new(number, capacity);
        let id = room.id;
        self.rooms.push(room);

        self.persist(&[Collection::Rooms]);
        Ok(id)
    }

    /// Change a room's capacity and/or status.
    ///
    /// Capacity may never drop below the current occupant count. An explicit
    /// status sticks, except that occupancy forces `Occupied` when the room
    /// is at capacity and not under maintenance.
    pub fn update_room(&mut self, cmd: UpdateRoom) -> ResultEngine<()> {
        let number = normalize_required_text(&cmd.number, "room number")?;
        let room = self
            .rooms
            .iter_mut()
            .find(|room| room.number == number)
            .ok_or_else(|| EngineError::RoomNotFound(number.clone()))?;

        if let Some(capacity) = cmd.capacity {
            if capacity == 0 {
                return Err(EngineError::Validation(
                    "room capacity must be > 0".to_string(),
                ));
            }
            if (room.occupants.len() as u32) > capacity {
                return Err(EngineError::CapacityViolation(number));
            }
            room.capacity = capacity;
        }

        if let Some(status) = cmd.status {
            room.status = status;
        }
        if room.is_full() && room.status == RoomStatus::Vacant {
            room.status = RoomStatus::Occupied;
        }

        self.persist(&[Collection::Rooms]);
        Ok(())
    }

    /// Replace the mess fee configuration.
    pub fn update_mess_fee(&mut self, fee: MessFeeConfig) -> ResultEngine<()> {
        if fee.monthly_rate_minor < 0 {
            return Err(EngineError::Validation(format!(
                "mess rate must be >= 0, got {}",
                fee.monthly_rate_minor
            )));
        }

        self.mess_fee = fee;
        self.persist(&[Collection::MessFee]);
        Ok(())
    }
}
