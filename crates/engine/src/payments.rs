//! Payment primitives.
//!
//! The payment collection is an append-only ledger: records are corrected in
//! place via explicit update, never merged, deduplicated or deleted.
//! Duplicate rent entries for the same resident and month are allowed by
//! design; callers are responsible for not double-recording.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MonthKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    Rent,
    Mess,
    Security,
    Other,
}

impl PaymentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Mess => "mess",
            Self::Security => "security",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for PaymentKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "rent" => Ok(Self::Rent),
            "mess" => Ok(Self::Mess),
            "security" => Ok(Self::Security),
            "other" => Ok(Self::Other),
            other => Err(EngineError::Validation(format!(
                "invalid payment kind: {other}"
            ))),
        }
    }
}

/// Status of a single payment.
///
/// `Overdue` is only ever set by an explicit caller update. The engine does
/// not derive it from due-date comparison at read time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
            Self::Overdue => "overdue",
        }
    }

    /// Pending and overdue payments are both outstanding.
    pub fn is_outstanding(self) -> bool {
        matches!(self, Self::Pending | Self::Overdue)
    }
}

impl TryFrom<&str> for PaymentStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            other => Err(EngineError::Validation(format!(
                "invalid payment status: {other}"
            ))),
        }
    }
}

/// A single financial transaction record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub resident_id: Uuid,
    /// Amount in minor currency units, always >= 0.
    pub amount_minor: i64,
    pub paid_on: NaiveDate,
    pub kind: PaymentKind,
    /// Target month the payment settles.
    pub month: MonthKey,
    pub status: PaymentStatus,
    pub note: Option<String>,
}

impl Payment {
    /// Whether this payment counts toward revenue: paid, and not a deposit
    /// held in trust.
    pub fn counts_toward_revenue(&self) -> bool {
        self.status == PaymentStatus::Paid && self.kind != PaymentKind::Security
    }
}
