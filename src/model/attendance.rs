use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use super::timefmt;

/// Status carried by a punch event and resolved onto the daily record.
/// Precedence when a day holds conflicting statuses: Absent > Late > Present.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum PunchEventType {
    Entry,
    Exit,
    Absent,
}

/// One row of the append-only punch log, as emitted by the door terminals.
/// Never mutated after being recorded; attendance records are recomputed
/// from the full log on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RawPunchEvent {
    /// Monotonic within a day; the smallest id of a group becomes the
    /// identity of the reconciled record.
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "E1001")]
    pub employee_id: String,
    #[schema(example = "2024-07-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[serde(with = "timefmt")]
    #[schema(example = "09:05", value_type = String)]
    pub time: NaiveTime,
    pub event_type: PunchEventType,
    pub status: AttendanceStatus,
}

/// Canonical daily attendance, one per (employee, date). A pure projection
/// of the punch log; holds no independent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "E1001")]
    pub employee_id: String,
    #[schema(example = "2024-07-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[serde(with = "timefmt::option")]
    #[schema(example = "09:05", value_type = Option<String>, nullable = true)]
    pub entry_time: Option<NaiveTime>,
    #[serde(with = "timefmt::option")]
    #[schema(example = "17:30", value_type = Option<String>, nullable = true)]
    pub exit_time: Option<NaiveTime>,
    pub status: AttendanceStatus,
}
