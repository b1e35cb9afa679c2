use chrono::Utc;
use uuid::Uuid;

use crate::{
    Collection, Engine, EngineError, MonthKey, NewResident, Payment, PaymentKind, PaymentStatus,
    Resident, ResidentStatus, ResultEngine, occupancy,
};

use super::normalize_required_text;

impl Engine {
    /// Onboard a new resident into the named room.
    ///
    /// Attaching to the room, appending the resident record and synthesizing
    /// the security-deposit payment (when the deposit is positive) are
    /// atomic: any validation or occupancy failure aborts before the first
    /// mutation.
    pub fn add_resident(&mut self, cmd: NewResident) -> ResultEngine<Uuid> {
        let resident = Resident {
            id: Uuid::new_v4(),
            name: normalize_required_text(&cmd.name, "name")?,
            contact_number: normalize_required_text(&cmd.contact_number, "contact number")?,
            home_address: normalize_required_text(&cmd.home_address, "home address")?,
            room_number: normalize_required_text(&cmd.room_number, "room number")?,
            rent_minor: cmd.rent_minor,
            due_day: cmd.due_day,
            security_deposit_minor: cmd.security_deposit_minor,
            joined_on: cmd.joined_on,
            leaving_on: cmd.leaving_on,
            mess_subscribed: cmd.mess_subscribed,
            status: ResidentStatus::Active,
        };
        resident.validate()?;

        occupancy::reconcile(
            &mut self.rooms,
            resident.id,
            None,
            Some(&resident.room_number),
        )?;

        let id = resident.id;
        let deposit_minor = resident.security_deposit_minor;
        tracing::info!(resident = %id, room = %resident.room_number, "resident onboarded");
        self.residents.push(resident);

        let mut touched = vec![Collection::Residents, Collection::Rooms];
        if deposit_minor > 0 {
            let today = Utc::now().date_naive();
            self.payments.push(Payment {
                id: Uuid::new_v4(),
                resident_id: id,
                amount_minor: deposit_minor,
                paid_on: today,
                kind: PaymentKind::Security,
                month: MonthKey::from_date(today),
                status: PaymentStatus::Paid,
                note: Some("Security deposit".to_string()),
            });
            touched.push(Collection::Payments);
        }

        self.persist(&touched);
        Ok(id)
    }

    /// Replace a resident record, reconciling occupancy when the assignment
    /// changed.
    ///
    /// Room moves are capacity-checked against the target before anything is
    /// written. Deactivating through an update detaches the resident's bed,
    /// and reactivating re-attaches it, exactly as `remove_resident`/
    /// onboarding would.
    pub fn update_resident(&mut self, resident: Resident) -> ResultEngine<()> {
        resident.validate()?;

        let idx = self
            .residents
            .iter()
            .position(|stored| stored.id == resident.id)
            .ok_or_else(|| EngineError::ResidentNotFound(resident.id.to_string()))?;

        let prev = self.residents[idx].occupied_room().map(str::to_string);
        let next = resident.occupied_room().map(str::to_string);
        occupancy::reconcile(&mut self.rooms, resident.id, prev.as_deref(), next.as_deref())?;

        self.residents[idx] = resident;
        self.persist(&[Collection::Residents, Collection::Rooms]);
        Ok(())
    }

    /// Deactivate a resident, freeing their bed. The record and its payment
    /// history are kept. Removing an already-inactive resident is a no-op.
    pub fn remove_resident(&mut self, id: Uuid) -> ResultEngine<()> {
        let idx = self
            .residents
            .iter()
            .position(|resident| resident.id == id)
            .ok_or_else(|| EngineError::ResidentNotFound(id.to_string()))?;

        if self.residents[idx].status == ResidentStatus::Inactive {
            return Ok(());
        }

        let room = self.residents[idx].room_number.clone();
        occupancy::reconcile(&mut self.rooms, id, Some(&room), None)?;

        self.residents[idx].status = ResidentStatus::Inactive;
        tracing::info!(resident = %id, room = %room, "resident deactivated");
        self.persist(&[Collection::Residents, Collection::Rooms]);
        Ok(())
    }
}
