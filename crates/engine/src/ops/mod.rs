//! Engine operations, one file per concern.
//!
//! Every write path stages all validation before the first mutation so a
//! rejected command leaves the snapshot and the store untouched, then
//! persists the affected collections on the way out.

use crate::{EngineError, ResultEngine};

mod payments;
mod reports;
mod residents;
mod rooms;

pub use reports::{MonthlyRevenue, OccupancySummary, RevenueByKind, StatusCounts};

pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
