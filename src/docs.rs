use crate::api::access::{DoorStatusSummary, SetDoorStatus, UpdateAccessRights, UpdateDoorConfig};
use crate::api::attendance::{AttendanceListResponse, AttendanceQuery, DailySummary, RecordPunchEvent};
use crate::api::employee::{
    CreateEmployee, EmployeeListResponse, EmployeeQuery, UpdateEmployee,
};
use crate::api::report::{GenerateReportRequest, GenerateReportResponse};
use crate::api::shift::{AssignShiftRequest, AssignShiftResponse, UpdateShift};
use crate::auth::handlers::LoginResponse;
use crate::model::access::{AccessArea, Door, DoorStatus, IoPorts};
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, PunchEventType, RawPunchEvent,
};
use crate::model::employee::{AreaAccess, Employee};
use crate::model::role::Role;
use crate::model::shift::{Shift, ShiftAssignment};
use crate::models::{LoginReqDto, RegisterReq};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa::openapi;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "UniSync API",
        version = "1.0.0",
        description = r#"
## UniSync — Workforce Attendance & Access Control

Back end for the UniSync administrative dashboard.

### 🔹 Key Features
- **Employee Enrollment**
  - Enroll, update, list, and remove employee profiles
- **Shift Management**
  - Bulk shift assignment over date ranges, with overlap resolution
- **Attendance**
  - Raw punch log plus reconciled per-day records and trend summaries
- **Access Control**
  - Areas, doors, per-employee access rights (mock hardware state)
- **AI Reports**
  - Natural-language attendance reports from structured filters

### 🔐 Security
Most endpoints are protected using **JWT Bearer authentication**.

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::register,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::logout,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::list_departments,

        crate::api::shift::list_shifts,
        crate::api::shift::assign,
        crate::api::shift::update_shift,

        crate::api::attendance::list_records,
        crate::api::attendance::list_events,
        crate::api::attendance::record_event,
        crate::api::attendance::daily_summary,

        crate::api::access::list_areas,
        crate::api::access::set_door_status,
        crate::api::access::update_door_config,
        crate::api::access::update_access_rights,
        crate::api::access::door_summary,

        crate::api::report::generate
    ),
    components(
        schemas(
            LoginReqDto,
            RegisterReq,
            LoginResponse,
            Role,
            Employee,
            AreaAccess,
            CreateEmployee,
            UpdateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            Shift,
            ShiftAssignment,
            AssignShiftRequest,
            AssignShiftResponse,
            UpdateShift,
            AttendanceStatus,
            PunchEventType,
            RawPunchEvent,
            AttendanceRecord,
            AttendanceQuery,
            AttendanceListResponse,
            RecordPunchEvent,
            DailySummary,
            DoorStatus,
            Door,
            IoPorts,
            AccessArea,
            SetDoorStatus,
            UpdateDoorConfig,
            UpdateAccessRights,
            DoorStatusSummary,
            GenerateReportRequest,
            GenerateReportResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and token lifecycle"),
        (name = "Employee", description = "Employee enrollment APIs"),
        (name = "Shift", description = "Shift reference data and assignment"),
        (name = "Attendance", description = "Punch log and reconciled attendance"),
        (name = "Access", description = "Areas, doors, and access rights"),
        (name = "Reports", description = "AI report generation"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
