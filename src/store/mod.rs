//! In-memory application state.
//!
//! Every collection is held as an immutable snapshot behind one lock:
//! readers clone the slices they need, the pure domain functions compute a
//! replacement, and writers swap whole snapshots back in. Nothing mutates
//! shared state in place. Attendance records are never stored at all; each
//! read reconciles the current punch log.

mod seed;

pub use seed::DEMO_PASSWORD;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{NaiveDate, NaiveTime};

use crate::model::{
    access::{AccessArea, Door, DoorStatus},
    attendance::{AttendanceStatus, PunchEventType, RawPunchEvent},
    employee::{AreaAccess, Employee},
    role::Role,
    shift::Shift,
};

/// An administrative login. Separate from the employee roster: an account
/// may reference an employee profile but does not have to.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: u64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub employee_id: Option<String>,
}

/// An issued refresh token, keyed by its jti claim.
#[derive(Debug, Clone)]
struct RefreshToken {
    user_id: u64,
    revoked: bool,
}

#[derive(Debug, Default)]
struct Snapshot {
    employees: Vec<Employee>,
    shifts: Vec<Shift>,
    areas: Vec<AccessArea>,
    punch_log: Vec<RawPunchEvent>,
    users: Vec<UserAccount>,
    refresh_tokens: std::collections::HashMap<String, RefreshToken>,
    next_user_id: u64,
}

#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<Snapshot>,
}

impl Store {
    /// Store populated with the stock demo fixtures.
    pub fn seeded() -> Self {
        Self {
            inner: RwLock::new(seed::snapshot()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    // ---------- employees ----------

    pub fn employees(&self) -> Vec<Employee> {
        self.read().employees.clone()
    }

    pub fn employee(&self, id: &str) -> Option<Employee> {
        self.read().employees.iter().find(|e| e.id == id).cloned()
    }

    /// Atomic roster read-modify-write: `apply` computes a replacement
    /// roster (e.g. via [`crate::domain::shift_assignment::assign_shift`])
    /// while the write lock is held, so the basis can never go stale under
    /// a concurrent enrollment or rights update. On error nothing changes.
    pub fn update_employees<E>(
        &self,
        apply: impl FnOnce(&[Employee]) -> Result<Vec<Employee>, E>,
    ) -> Result<Vec<Employee>, E> {
        let mut inner = self.write();
        let updated = apply(&inner.employees)?;
        inner.employees = updated.clone();
        Ok(updated)
    }

    /// Fails with the existing employee when the id is already enrolled.
    pub fn insert_employee(&self, employee: Employee) -> Result<(), Employee> {
        let mut inner = self.write();
        if let Some(existing) = inner.employees.iter().find(|e| e.id == employee.id) {
            return Err(existing.clone());
        }
        inner.employees.push(employee);
        Ok(())
    }

    /// Applies `apply` to the matching employee; returns the updated copy,
    /// or None when the id is unknown.
    pub fn update_employee(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Employee),
    ) -> Option<Employee> {
        let mut inner = self.write();
        let employee = inner.employees.iter_mut().find(|e| e.id == id)?;
        apply(employee);
        Some(employee.clone())
    }

    pub fn delete_employee(&self, id: &str) -> bool {
        let mut inner = self.write();
        let before = inner.employees.len();
        inner.employees.retain(|e| e.id != id);
        inner.employees.len() < before
    }

    pub fn departments(&self) -> Vec<String> {
        let inner = self.read();
        let mut departments: Vec<String> =
            inner.employees.iter().map(|e| e.department.clone()).collect();
        departments.sort();
        departments.dedup();
        departments
    }

    pub fn set_access_rights(&self, id: &str, rights: Vec<AreaAccess>) -> Option<Employee> {
        self.update_employee(id, |e| e.access_rights = rights)
    }

    // ---------- shifts ----------

    pub fn shifts(&self) -> Vec<Shift> {
        self.read().shifts.clone()
    }

    pub fn shift(&self, id: &str) -> Option<Shift> {
        self.read().shifts.iter().find(|s| s.id == id).cloned()
    }

    /// Applies `apply` to the matching shift definition; returns the
    /// updated copy, or None when the id is unknown.
    pub fn update_shift(&self, id: &str, apply: impl FnOnce(&mut Shift)) -> Option<Shift> {
        let mut inner = self.write();
        let shift = inner.shifts.iter_mut().find(|s| s.id == id)?;
        apply(shift);
        Some(shift.clone())
    }

    // ---------- access areas ----------

    pub fn areas(&self) -> Vec<AccessArea> {
        self.read().areas.clone()
    }

    pub fn area(&self, id: &str) -> Option<AccessArea> {
        self.read().areas.iter().find(|a| a.id == id).cloned()
    }

    /// Applies `apply` to the matching door; returns the updated area, or
    /// None when the area or door is unknown.
    pub fn update_door(
        &self,
        area_id: &str,
        door_id: &str,
        apply: impl FnOnce(&mut Door),
    ) -> Option<AccessArea> {
        let mut inner = self.write();
        let area = inner.areas.iter_mut().find(|a| a.id == area_id)?;
        let door = area.doors.iter_mut().find(|d| d.id == door_id)?;
        apply(door);
        Some(area.clone())
    }

    /// Sets a door's mock status. None when the area or door is unknown.
    pub fn set_door_status(
        &self,
        area_id: &str,
        door_id: &str,
        status: DoorStatus,
    ) -> Option<AccessArea> {
        self.update_door(area_id, door_id, |door| door.status = status)
    }

    // ---------- punch log ----------

    pub fn punch_events(&self) -> Vec<RawPunchEvent> {
        self.read().punch_log.clone()
    }

    /// Appends to the log with the next free event id and returns the
    /// recorded event.
    pub fn append_punch_event(
        &self,
        employee_id: String,
        date: NaiveDate,
        time: NaiveTime,
        event_type: PunchEventType,
        status: AttendanceStatus,
    ) -> RawPunchEvent {
        let mut inner = self.write();
        let id = inner.punch_log.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let event = RawPunchEvent {
            id,
            employee_id,
            date,
            time,
            event_type,
            status,
        };
        inner.punch_log.push(event.clone());
        event
    }

    // ---------- user accounts ----------

    pub fn user_by_username(&self, username: &str) -> Option<UserAccount> {
        self.read()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    /// None when the username is already taken.
    pub fn insert_user(
        &self,
        username: String,
        password_hash: String,
        role: Role,
        employee_id: Option<String>,
    ) -> Option<UserAccount> {
        let mut inner = self.write();
        if inner.users.iter().any(|u| u.username == username) {
            return None;
        }
        let user = UserAccount {
            id: inner.next_user_id,
            username,
            password_hash,
            role,
            employee_id,
        };
        inner.next_user_id += 1;
        inner.users.push(user.clone());
        Some(user)
    }

    // ---------- refresh tokens ----------

    pub fn record_refresh_token(&self, jti: String, user_id: u64) {
        self.write()
            .refresh_tokens
            .insert(jti, RefreshToken { user_id, revoked: false });
    }

    /// Returns the owning user id when the jti is known and not yet revoked.
    pub fn active_refresh_token(&self, jti: &str) -> Option<u64> {
        self.read()
            .refresh_tokens
            .get(jti)
            .filter(|t| !t.revoked)
            .map(|t| t.user_id)
    }

    /// Idempotent; revoking an unknown jti is a no-op.
    pub fn revoke_refresh_token(&self, jti: &str) {
        if let Some(token) = self.write().refresh_tokens.get_mut(jti) {
            token.revoked = true;
        }
    }
}
