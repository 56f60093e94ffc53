use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::timefmt;

/// Static shift reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "shift-1",
        "name": "Day Shift",
        "start_time": "09:00",
        "end_time": "17:00",
        "grace_period": 10
    })
)]
pub struct Shift {
    pub id: String,
    pub name: String,
    #[serde(with = "timefmt")]
    #[schema(example = "09:00", value_type = String)]
    pub start_time: NaiveTime,
    #[serde(with = "timefmt")]
    #[schema(example = "17:00", value_type = String)]
    pub end_time: NaiveTime,
    /// Minutes after shift start before an entry counts as late.
    #[schema(example = 10)]
    pub grace_period: u32,
}

/// A shift held by one employee over an inclusive date range.
/// After any roster update no two assignments on the same employee
/// may have overlapping ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShiftAssignment {
    #[schema(example = "shift-1")]
    pub shift_id: String,
    #[schema(example = "2024-07-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,
    #[schema(example = "2024-07-15", value_type = String, format = "date")]
    pub end_date: NaiveDate,
}

impl ShiftAssignment {
    /// Inclusive range intersection test.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}
