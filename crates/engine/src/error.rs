//! The module contains the errors the engine can throw.
//!
//! Structural failures ([`RoomNotFound`], [`RoomFull`], [`CapacityViolation`])
//! abort the whole operation before any state is committed. [`Storage`] is
//! surfaced on startup loads only; snapshot writes that fail are logged and
//! retried on the next mutation instead.
//!
//! [`RoomNotFound`]: EngineError::RoomNotFound
//! [`RoomFull`]: EngineError::RoomFull
//! [`CapacityViolation`]: EngineError::CapacityViolation
//! [`Storage`]: EngineError::Storage
use thiserror::Error;

use crate::storage::StorageError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("room \"{0}\" not found")]
    RoomNotFound(String),
    #[error("room \"{0}\" has no free bed")]
    RoomFull(String),
    #[error("room \"{0}\": capacity below current occupancy")]
    CapacityViolation(String),
    #[error("payment \"{0}\" not found")]
    PaymentNotFound(String),
    #[error("resident \"{0}\" not found")]
    ResidentNotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::RoomNotFound(a), Self::RoomNotFound(b)) => a == b,
            (Self::RoomFull(a), Self::RoomFull(b)) => a == b,
            (Self::CapacityViolation(a), Self::CapacityViolation(b)) => a == b,
            (Self::PaymentNotFound(a), Self::PaymentNotFound(b)) => a == b,
            (Self::ResidentNotFound(a), Self::ResidentNotFound(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
