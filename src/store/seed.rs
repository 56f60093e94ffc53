//! Demo fixtures: the roster, shifts, access areas, punch log, and logins
//! the dashboard ships with. Punch event ids stay monotonic per day so the
//! reconciler's min-id tie-break is meaningful.

use chrono::{NaiveDate, NaiveTime};

use super::{Snapshot, UserAccount};
use crate::auth::password::hash_password;
use crate::model::{
    access::{AccessArea, Door, DoorStatus, IoPorts},
    attendance::{AttendanceStatus, PunchEventType, RawPunchEvent},
    employee::{AreaAccess, Employee},
    role::Role,
    shift::Shift,
};

/// Every seeded account logs in with this password.
pub const DEMO_PASSWORD: &str = "changeme";

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid seed date")
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid seed time")
}

fn shift(id: &str, name: &str, start: &str, end: &str, grace_period: u32) -> Shift {
    Shift {
        id: id.to_string(),
        name: name.to_string(),
        start_time: time(start),
        end_time: time(end),
        grace_period,
    }
}

fn assignment(shift_id: &str, start: &str, end: &str) -> crate::model::shift::ShiftAssignment {
    crate::model::shift::ShiftAssignment {
        shift_id: shift_id.to_string(),
        start_date: date(start),
        end_date: date(end),
    }
}

fn access(area_id: &str, door_ids: &[&str]) -> AreaAccess {
    AreaAccess {
        area_id: area_id.to_string(),
        door_ids: door_ids.iter().map(|d| d.to_string()).collect(),
    }
}

fn employee(
    id: &str,
    name: &str,
    department: &str,
    enrolled: &str,
    role: Role,
    seed: u32,
    assignments: Vec<crate::model::shift::ShiftAssignment>,
    access_rights: Vec<AreaAccess>,
) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        enrollment_date: date(enrolled),
        role,
        image_url: Some(format!("https://picsum.photos/seed/{seed}/32/32")),
        shift_assignments: assignments,
        access_rights,
    }
}

fn door(id: &str, name: &str, status: DoorStatus) -> Door {
    Door {
        id: id.to_string(),
        name: name.to_string(),
        status,
        ip: None,
        port: None,
        io_ports: None,
    }
}

fn wired_door(
    id: &str,
    name: &str,
    status: DoorStatus,
    ip: &str,
    port: u16,
    input: u16,
    output: u16,
) -> Door {
    Door {
        ip: Some(ip.to_string()),
        port: Some(port),
        io_ports: Some(IoPorts { input, output }),
        ..door(id, name, status)
    }
}

fn event(
    id: u64,
    employee_id: &str,
    day: &str,
    at: &str,
    event_type: PunchEventType,
    status: AttendanceStatus,
) -> RawPunchEvent {
    RawPunchEvent {
        id,
        employee_id: employee_id.to_string(),
        date: date(day),
        time: time(at),
        event_type,
        status,
    }
}

pub(super) fn snapshot() -> Snapshot {
    use AttendanceStatus::{Absent, Late, Present};
    use PunchEventType as Ev;

    let shifts = vec![
        shift("shift-1", "Day Shift", "09:00", "17:00", 10),
        shift("shift-2", "Night Shift", "17:00", "01:00", 10),
        shift("shift-3", "Morning Shift", "06:00", "14:00", 5),
    ];

    let employees = vec![
        employee(
            "E1001",
            "Alice Johnson",
            "Engineering",
            "2022-08-15",
            Role::Admin,
            2,
            vec![
                assignment("shift-1", "2024-07-01", "2024-07-15"),
                assignment("shift-2", "2024-07-16", "2024-07-31"),
            ],
            vec![access("area-01", &["D001", "D002"]), access("area-02", &["D101"])],
        ),
        employee(
            "E1002",
            "Bob Williams",
            "Marketing",
            "2021-03-10",
            Role::Supervisor,
            3,
            vec![assignment("shift-1", "2024-07-01", "2024-07-31")],
            vec![access("area-01", &["D001"])],
        ),
        employee(
            "M2005",
            "Charlie Brown",
            "Engineering",
            "2023-01-20",
            Role::Employee,
            4,
            vec![assignment("shift-3", "2024-07-01", "2024-07-31")],
            vec![
                access("area-01", &["D001", "D002", "D003"]),
                access("area-02", &["D101", "D102"]),
            ],
        ),
        employee(
            "F3108",
            "Diana Miller",
            "Human Resources",
            "2020-11-05",
            Role::Employee,
            5,
            vec![assignment("shift-1", "2024-07-01", "2024-07-31")],
            vec![access("area-01", &["D001", "D002"]), access("area-03", &["D202"])],
        ),
        employee(
            "S4011",
            "Ethan Davis",
            "Sales",
            "2022-09-01",
            Role::Employee,
            6,
            vec![assignment("shift-2", "2024-07-01", "2024-07-31")],
            vec![access("area-01", &["D001"])],
        ),
        employee(
            "F3109",
            "Fiona Garcia",
            "Human Resources",
            "2023-07-12",
            Role::Supervisor,
            7,
            vec![],
            vec![access("area-01", &["D001", "D002"]), access("area-03", &["D202"])],
        ),
    ];

    let areas = vec![
        AccessArea {
            id: "area-01".to_string(),
            name: "Main Office".to_string(),
            description: "General access area for all employees.".to_string(),
            doors: vec![
                wired_door("D001", "Main Entrance", DoorStatus::Unlocked, "192.168.1.10", 8080, 1, 2),
                wired_door("D002", "Lobby", DoorStatus::Unlocked, "192.168.1.11", 8080, 1, 2),
                wired_door("D003", "East Wing Hallway", DoorStatus::Locked, "192.168.1.12", 8080, 1, 2),
            ],
        },
        AccessArea {
            id: "area-02".to_string(),
            name: "Server Room".to_string(),
            description: "Restricted access for IT personnel only.".to_string(),
            doors: vec![
                wired_door("D101", "Server Room Door", DoorStatus::Locked, "192.168.2.10", 9000, 3, 4),
                door("D102", "Maintenance Hatch", DoorStatus::Locked),
            ],
        },
        AccessArea {
            id: "area-03".to_string(),
            name: "Executive Suite".to_string(),
            description: "Access limited to executive staff.".to_string(),
            doors: vec![
                door("D201", "CEO Office", DoorStatus::Locked),
                door("D202", "Boardroom", DoorStatus::Unlocked),
            ],
        },
        AccessArea {
            id: "area-04".to_string(),
            name: "Warehouse".to_string(),
            description: "Shipping and receiving area.".to_string(),
            doors: vec![
                door("D301", "Loading Bay 1", DoorStatus::Unlocked),
                door("D302", "Loading Bay 2", DoorStatus::Jammed),
                door("D303", "Staff Entrance", DoorStatus::Locked),
            ],
        },
    ];

    let punch_log = vec![
        event(1, "E1001", "2024-07-01", "09:05", Ev::Entry, Present),
        event(2, "E1001", "2024-07-01", "17:30", Ev::Exit, Present),
        event(3, "E1002", "2024-07-01", "09:15", Ev::Entry, Late),
        event(4, "E1002", "2024-07-01", "18:00", Ev::Exit, Present),
        event(5, "M2005", "2024-07-01", "06:00", Ev::Entry, Present),
        event(6, "M2005", "2024-07-01", "14:00", Ev::Exit, Present),
        event(7, "F3108", "2024-07-01", "09:00", Ev::Entry, Present),
        event(8, "F3108", "2024-07-01", "17:00", Ev::Exit, Present),
        event(9, "S4011", "2024-07-01", "17:30", Ev::Entry, Late),
        event(10, "S4011", "2024-07-01", "01:00", Ev::Exit, Present),
        event(11, "F3109", "2024-07-01", "09:00", Ev::Entry, Present),
        event(12, "F3109", "2024-07-01", "17:00", Ev::Exit, Present),
        event(13, "E1001", "2024-07-02", "09:00", Ev::Entry, Present),
        event(14, "E1001", "2024-07-02", "17:00", Ev::Exit, Present),
        event(15, "E1002", "2024-07-02", "09:00", Ev::Entry, Present),
        event(16, "E1002", "2024-07-02", "17:00", Ev::Exit, Present),
        event(17, "E1001", "2024-07-03", "00:00", Ev::Absent, Absent),
        event(18, "M2005", "2024-07-03", "06:05", Ev::Entry, Present),
        event(19, "M2005", "2024-07-03", "14:00", Ev::Exit, Present),
        event(20, "S4011", "2024-07-03", "17:00", Ev::Entry, Present),
        event(21, "S4011", "2024-07-03", "01:00", Ev::Exit, Present),
        event(22, "E1002", "2024-07-04", "09:20", Ev::Entry, Late),
        event(23, "E1002", "2024-07-04", "17:00", Ev::Exit, Present),
        event(24, "F3108", "2024-07-04", "09:00", Ev::Entry, Present),
        event(25, "F3108", "2024-07-04", "17:00", Ev::Exit, Present),
        event(26, "F3109", "2024-07-05", "00:00", Ev::Absent, Absent),
        event(27, "E1001", "2024-07-05", "09:12", Ev::Entry, Late),
        event(28, "E1001", "2024-07-05", "17:00", Ev::Exit, Present),
        event(29, "E1001", "2024-07-06", "09:00", Ev::Entry, Present),
        event(30, "E1001", "2024-07-06", "17:00", Ev::Exit, Present),
        event(31, "E1002", "2024-07-05", "09:00", Ev::Entry, Present),
        event(32, "E1002", "2024-07-05", "17:00", Ev::Exit, Present),
        event(33, "M2005", "2024-07-04", "00:00", Ev::Absent, Absent),
        event(34, "S4011", "2024-07-04", "17:15", Ev::Entry, Late),
        event(35, "S4011", "2024-07-04", "01:30", Ev::Exit, Present),
        event(36, "F3109", "2024-07-06", "09:00", Ev::Entry, Present),
        event(37, "F3109", "2024-07-06", "17:00", Ev::Exit, Present),
        event(38, "E1001", "2024-07-08", "09:00", Ev::Entry, Present),
        event(39, "E1001", "2024-07-08", "17:00", Ev::Exit, Present),
        event(40, "E1002", "2024-07-08", "09:30", Ev::Entry, Late),
        event(41, "E1002", "2024-07-08", "17:00", Ev::Exit, Present),
        event(42, "M2005", "2024-07-08", "00:00", Ev::Absent, Absent),
        event(43, "F3108", "2024-07-08", "09:00", Ev::Entry, Present),
        event(44, "F3108", "2024-07-08", "17:00", Ev::Exit, Present),
        event(45, "S4011", "2024-07-08", "17:00", Ev::Entry, Present),
        event(46, "S4011", "2024-07-08", "01:00", Ev::Exit, Present),
        event(47, "F3109", "2024-07-08", "09:00", Ev::Entry, Present),
        event(48, "F3109", "2024-07-08", "17:00", Ev::Exit, Present),
        event(49, "E1001", "2024-07-09", "09:00", Ev::Entry, Present),
        event(50, "E1001", "2024-07-09", "17:00", Ev::Exit, Present),
        event(51, "E1002", "2024-07-09", "00:00", Ev::Absent, Absent),
        event(52, "M2005", "2024-07-09", "06:00", Ev::Entry, Present),
        event(53, "M2005", "2024-07-09", "14:00", Ev::Exit, Present),
        event(54, "E1001", "2024-07-10", "09:00", Ev::Entry, Present),
        event(55, "E1001", "2024-07-10", "17:00", Ev::Exit, Present),
        event(56, "E1002", "2024-07-10", "09:05", Ev::Entry, Present),
        event(57, "E1002", "2024-07-10", "17:00", Ev::Exit, Present),
        event(58, "M2005", "2024-07-10", "06:10", Ev::Entry, Late),
        event(59, "M2005", "2024-07-10", "14:00", Ev::Exit, Present),
        event(60, "F3108", "2024-07-10", "00:00", Ev::Absent, Absent),
        event(61, "S4011", "2024-07-10", "17:00", Ev::Entry, Present),
        event(62, "S4011", "2024-07-10", "01:00", Ev::Exit, Present),
        event(63, "F3109", "2024-07-10", "09:00", Ev::Entry, Present),
        event(64, "F3109", "2024-07-10", "17:00", Ev::Exit, Present),
    ];

    // One hash shared by every demo account; argon2 is deliberately slow
    // and these are throwaway credentials.
    let demo_hash = hash_password(DEMO_PASSWORD);
    let account = |id: u64, username: &str, role: Role, employee_id: &str| UserAccount {
        id,
        username: username.to_string(),
        password_hash: demo_hash.clone(),
        role,
        employee_id: Some(employee_id.to_string()),
    };

    let users = vec![
        account(1, "alice", Role::Admin, "E1001"),
        account(2, "bob", Role::Supervisor, "E1002"),
        account(3, "charlie", Role::Employee, "M2005"),
        account(4, "diana", Role::Employee, "F3108"),
        account(5, "ethan", Role::Employee, "S4011"),
        account(6, "fiona", Role::Supervisor, "F3109"),
    ];

    Snapshot {
        employees,
        shifts,
        areas,
        punch_log,
        users,
        refresh_tokens: Default::default(),
        next_user_id: 7,
    }
}
