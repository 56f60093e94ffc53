//! Folds the raw punch log into canonical daily attendance.
//!
//! Door terminals emit entry/exit punches and absence markers, sometimes
//! duplicated or conflicting within one day. `reconcile` collapses them to
//! exactly one record per (employee, date) with deterministic tie-breaks:
//! earliest entry, latest exit, and status precedence Absent > Late > Present.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, PunchEventType, RawPunchEvent,
};

#[derive(Debug)]
struct DayGroup {
    id: u64,
    entry_time: Option<NaiveTime>,
    exit_time: Option<NaiveTime>,
    saw_late: bool,
    saw_absent: bool,
}

impl DayGroup {
    fn new() -> Self {
        Self {
            id: u64::MAX,
            entry_time: None,
            exit_time: None,
            saw_late: false,
            saw_absent: false,
        }
    }

    fn fold(&mut self, event: &RawPunchEvent) {
        // Earliest-logged event wins as the record's identity.
        self.id = self.id.min(event.id);

        match event.status {
            AttendanceStatus::Absent => self.saw_absent = true,
            AttendanceStatus::Late => self.saw_late = true,
            AttendanceStatus::Present => {}
        }

        match event.event_type {
            PunchEventType::Entry => {
                if self.entry_time.is_none_or(|t| event.time < t) {
                    self.entry_time = Some(event.time);
                }
            }
            PunchEventType::Exit => {
                if self.exit_time.is_none_or(|t| event.time > t) {
                    self.exit_time = Some(event.time);
                }
            }
            PunchEventType::Absent => {}
        }
    }

    fn status(&self) -> AttendanceStatus {
        if self.saw_absent {
            AttendanceStatus::Absent
        } else if self.saw_late {
            AttendanceStatus::Late
        } else {
            AttendanceStatus::Present
        }
    }
}

/// Pure and total: every distinct (employee, date) pair in the input yields
/// exactly one output record, sorted ascending by id. An absence marker
/// overrides any punch times recorded the same day.
pub fn reconcile(events: &[RawPunchEvent]) -> Vec<AttendanceRecord> {
    let mut groups: HashMap<(&str, NaiveDate), DayGroup> = HashMap::new();

    for event in events {
        groups
            .entry((event.employee_id.as_str(), event.date))
            .or_insert_with(DayGroup::new)
            .fold(event);
    }

    let mut records: Vec<AttendanceRecord> = groups
        .into_iter()
        .map(|((employee_id, date), group)| {
            let status = group.status();
            let (entry_time, exit_time) = if status == AttendanceStatus::Absent {
                (None, None)
            } else {
                (group.entry_time, group.exit_time)
            };
            AttendanceRecord {
                id: group.id,
                employee_id: employee_id.to_string(),
                date,
                entry_time,
                exit_time,
                status,
            }
        })
        .collect();

    records.sort_by_key(|r| r.id);
    records
}
