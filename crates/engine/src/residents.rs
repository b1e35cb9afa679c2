//! Resident records.
//!
//! Residents are never deleted. Deactivation keeps the id stable so the
//! payment history stays linked to a real record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidentStatus {
    Active,
    Inactive,
}

impl ResidentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl TryFrom<&str> for ResidentStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(EngineError::Validation(format!(
                "invalid resident status: {other}"
            ))),
        }
    }
}

/// A person occupying a room under a rent/deposit/mess arrangement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: Uuid,
    pub name: String,
    pub contact_number: String,
    pub home_address: String,
    /// Field of record for occupancy; `Room::occupants` mirrors it.
    pub room_number: String,
    /// Monthly rent in minor currency units.
    pub rent_minor: i64,
    /// Day of month the rent falls due (1..=31).
    pub due_day: u8,
    pub security_deposit_minor: i64,
    pub joined_on: NaiveDate,
    pub leaving_on: Option<NaiveDate>,
    pub mess_subscribed: bool,
    pub status: ResidentStatus,
}

impl Resident {
    pub fn is_active(&self) -> bool {
        self.status == ResidentStatus::Active
    }

    /// The room this resident counts against, if any. Inactive residents hold
    /// no bed regardless of their last `room_number`.
    pub(crate) fn occupied_room(&self) -> Option<&str> {
        self.is_active().then_some(self.room_number.as_str())
    }

    pub(crate) fn validate(&self) -> ResultEngine<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::Validation("name must not be empty".into()));
        }
        if self.contact_number.trim().is_empty() {
            return Err(EngineError::Validation(
                "contact number must not be empty".into(),
            ));
        }
        if self.home_address.trim().is_empty() {
            return Err(EngineError::Validation(
                "home address must not be empty".into(),
            ));
        }
        if self.room_number.trim().is_empty() {
            return Err(EngineError::Validation(
                "room number must not be empty".into(),
            ));
        }
        if self.rent_minor <= 0 {
            return Err(EngineError::Validation(format!(
                "rent must be > 0, got {}",
                self.rent_minor
            )));
        }
        if !(1..=31).contains(&self.due_day) {
            return Err(EngineError::Validation(format!(
                "due day must be in 1..=31, got {}",
                self.due_day
            )));
        }
        if self.security_deposit_minor < 0 {
            return Err(EngineError::Validation(format!(
                "security deposit must be >= 0, got {}",
                self.security_deposit_minor
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resident() -> Resident {
        Resident {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            contact_number: "555-0101".to_string(),
            home_address: "12 Hill Road".to_string(),
            room_number: "101".to_string(),
            rent_minor: 7500,
            due_day: 5,
            security_deposit_minor: 5000,
            joined_on: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            leaving_on: None,
            mess_subscribed: true,
            status: ResidentStatus::Active,
        }
    }

    #[test]
    fn valid_resident_passes() {
        resident().validate().unwrap();
    }

    #[test]
    fn rejects_zero_rent() {
        let mut r = resident();
        r.rent_minor = 0;
        assert!(matches!(r.validate(), Err(EngineError::Validation(_))));
    }

    #[test]
    fn rejects_due_day_out_of_range() {
        let mut r = resident();
        r.due_day = 32;
        assert!(r.validate().is_err());
        r.due_day = 0;
        assert!(r.validate().is_err());
    }

    #[test]
    fn rejects_blank_contact() {
        let mut r = resident();
        r.contact_number = "   ".to_string();
        assert!(r.validate().is_err());
    }

    #[test]
    fn inactive_resident_holds_no_bed() {
        let mut r = resident();
        assert_eq!(r.occupied_room(), Some("101"));
        r.status = ResidentStatus::Inactive;
        assert_eq!(r.occupied_room(), None);
    }
}
