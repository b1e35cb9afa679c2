use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod payment {
    use super::*;

    /// Flat projection of a payment for tabular export.
    ///
    /// `resident` is the display name resolved at export time; payments whose
    /// resident no longer resolves carry a placeholder instead of failing the
    /// export.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExportRow {
        pub date: NaiveDate,
        pub resident: String,
        pub amount: i64,
        pub kind: String,
        pub status: String,
        pub month: String,
        pub notes: String,
    }
}

pub mod stats {
    use super::*;

    /// Headline revenue figures for the summary view.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RevenueSummary {
        pub total_minor: i64,
        pub current_month_minor: i64,
        pub pending_count: usize,
        pub overdue_count: usize,
    }

    /// Beds occupied against total capacity.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct OccupancySummary {
        pub capacity: u64,
        pub occupied: u64,
        pub rate_percent: f64,
    }
}
