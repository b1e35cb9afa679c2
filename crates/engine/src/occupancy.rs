//! Occupancy reconciliation.
//!
//! `Resident::room_number` is the field of record; the function here is the
//! only writer of `Room::occupants` and the occupancy-derived part of
//! `Room::status`. Every check runs before the first mutation, so a rejected
//! reconciliation leaves all rooms untouched.

use uuid::Uuid;

use crate::{EngineError, ResultEngine, rooms::Room, rooms::RoomStatus};

/// Move a resident between rooms.
///
/// `prev`/`next` are the room numbers the resident occupied before and after
/// the triggering mutation: `(None, Some)` on onboarding, `(Some, None)` on
/// deactivation, `(Some, Some)` on a transfer. Equal numbers are a no-op.
///
/// A missing `prev` room is tolerated (detach is defensive against data
/// drift); a missing `next` room is an error.
pub(crate) fn reconcile(
    rooms: &mut [Room],
    resident_id: Uuid,
    prev: Option<&str>,
    next: Option<&str>,
) -> ResultEngine<()> {
    if prev == next {
        return Ok(());
    }

    // Validate the target before touching anything.
    let attach_idx = match next {
        Some(number) => {
            let idx = rooms
                .iter()
                .position(|room| room.number == number)
                .ok_or_else(|| EngineError::RoomNotFound(number.to_string()))?;
            let room = &rooms[idx];
            if room.has_occupant(resident_id) {
                None
            } else if room.status() == RoomStatus::Maintenance {
                return Err(EngineError::Validation(format!(
                    "room {number} is under maintenance and admits no occupants"
                )));
            } else if room.is_full() {
                return Err(EngineError::RoomFull(number.to_string()));
            } else {
                Some(idx)
            }
        }
        None => None,
    };

    if let Some(number) = prev
        && let Some(room) = rooms.iter_mut().find(|room| room.number == number)
    {
        room.occupants.retain(|id| *id != resident_id);
        room.refresh_status();
    }

    if let Some(idx) = attach_idx {
        let room = &mut rooms[idx];
        room.occupants.push(resident_id);
        room.refresh_status();
    }

    Ok(())
}
