//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists. Fields arrive typed; the ops
//! layer validates values, not shapes.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{MonthKey, PaymentKind, PaymentStatus, RoomStatus};

/// Onboard a new resident.
#[derive(Clone, Debug)]
pub struct NewResident {
    pub name: String,
    pub contact_number: String,
    pub home_address: String,
    pub room_number: String,
    pub rent_minor: i64,
    pub due_day: u8,
    pub security_deposit_minor: i64,
    pub joined_on: NaiveDate,
    pub leaving_on: Option<NaiveDate>,
    pub mess_subscribed: bool,
}

impl NewResident {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        room_number: impl Into<String>,
        rent_minor: i64,
        due_day: u8,
        joined_on: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            contact_number: String::new(),
            home_address: String::new(),
            room_number: room_number.into(),
            rent_minor,
            due_day,
            security_deposit_minor: 0,
            joined_on,
            leaving_on: None,
            mess_subscribed: false,
        }
    }

    #[must_use]
    pub fn contact_number(mut self, contact_number: impl Into<String>) -> Self {
        self.contact_number = contact_number.into();
        self
    }

    #[must_use]
    pub fn home_address(mut self, home_address: impl Into<String>) -> Self {
        self.home_address = home_address.into();
        self
    }

    #[must_use]
    pub fn security_deposit(mut self, deposit_minor: i64) -> Self {
        self.security_deposit_minor = deposit_minor;
        self
    }

    #[must_use]
    pub fn leaving_on(mut self, leaving_on: NaiveDate) -> Self {
        self.leaving_on = Some(leaving_on);
        self
    }

    #[must_use]
    pub fn mess_subscribed(mut self, subscribed: bool) -> Self {
        self.mess_subscribed = subscribed;
        self
    }
}

/// Record a payment against a resident's ledger.
#[derive(Clone, Debug)]
pub struct RecordPayment {
    pub resident_id: Uuid,
    pub amount_minor: i64,
    pub paid_on: NaiveDate,
    pub kind: PaymentKind,
    pub month: MonthKey,
    pub status: PaymentStatus,
    pub note: Option<String>,
}

impl RecordPayment {
    /// Defaults: paid today (UTC), status `Paid`, no note.
    #[must_use]
    pub fn new(resident_id: Uuid, amount_minor: i64, kind: PaymentKind, month: MonthKey) -> Self {
        Self {
            resident_id,
            amount_minor,
            paid_on: chrono::Utc::now().date_naive(),
            kind,
            month,
            status: PaymentStatus::Paid,
            note: None,
        }
    }

    #[must_use]
    pub fn paid_on(mut self, paid_on: NaiveDate) -> Self {
        self.paid_on = paid_on;
        self
    }

    #[must_use]
    pub fn status(mut self, status: PaymentStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Update a room's capacity and/or status. The occupant list is never taken
/// from the caller; the reconciler is its sole writer.
#[derive(Clone, Debug)]
pub struct UpdateRoom {
    pub number: String,
    pub capacity: Option<u32>,
    pub status: Option<RoomStatus>,
}

impl UpdateRoom {
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            capacity: None,
            status: None,
        }
    }

    #[must_use]
    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn status(mut self, status: RoomStatus) -> Self {
        self.status = Some(status);
        self
    }
}
