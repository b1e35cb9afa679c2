//! Mess (meal subscription) fee configuration.

use serde::{Deserialize, Serialize};

/// Singleton configuration for the monthly mess fee. Read by onboarding and
/// by payment-amount defaulting; mutated only via an explicit settings
/// update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessFeeConfig {
    /// Monthly rate in minor currency units.
    pub monthly_rate_minor: i64,
    pub active: bool,
}

impl Default for MessFeeConfig {
    fn default() -> Self {
        Self {
            monthly_rate_minor: 2000,
            active: true,
        }
    }
}
