// ABOUTME: Maps timestamps to canonical calendar-day keys for aggregate bucketing
// ABOUTME: Two divergent boundary policies, local midnight and UTC midnight, selected per call site

//! Day-bucket resolution.
//!
//! Meal/macro and water logging bucket by local midnight; calorie logging
//! buckets by UTC midnight. The two conventions are kept as explicit
//! policies chosen per logging surface; unifying them would shift
//! user-visible day boundaries for existing rows.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Day boundary policy for bucketing a timestamp into a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBoundary {
    /// Zero out the time of day in the server's local timezone
    LocalMidnight,
    /// Take the UTC year/month/day components
    UtcMidnight,
}

/// Boundary used by the macro/meal logging surface
pub const MACRO_LOG_BOUNDARY: DayBoundary = DayBoundary::LocalMidnight;
/// Boundary used by the calorie logging surface
pub const CALORIE_LOG_BOUNDARY: DayBoundary = DayBoundary::UtcMidnight;
/// Boundary used by the water logging surface
pub const WATER_LOG_BOUNDARY: DayBoundary = DayBoundary::LocalMidnight;

impl DayBoundary {
    /// Resolve a timestamp (default: now) to its calendar-day key.
    #[must_use]
    pub fn resolve(self, at: Option<DateTime<Utc>>) -> NaiveDate {
        let ts = at.unwrap_or_else(Utc::now);
        match self {
            Self::LocalMidnight => ts.with_timezone(&Local).date_naive(),
            Self::UtcMidnight => ts.date_naive(),
        }
    }

    /// Today's bucket under this policy.
    #[must_use]
    pub fn today(self) -> NaiveDate {
        self.resolve(None)
    }
}
