use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::{
    domain::reconcile::reconcile,
    model::attendance::{AttendanceRecord, AttendanceStatus, PunchEventType, RawPunchEvent},
    store::Store,
};
use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::model::timefmt;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceQuery {
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub status: Option<AttendanceStatus>,
    #[schema(example = "2024-07-01", format = "date", value_type = Option<String>)]
    pub from: Option<NaiveDate>,
    #[schema(example = "2024-07-10", format = "date", value_type = Option<String>)]
    pub to: Option<NaiveDate>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceRecord>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 42)]
    pub total: usize,
}

/// Reconciled attendance records
///
/// Recomputed from the full punch log on every read: one record per
/// (employee, date), earliest entry, latest exit, status precedence
/// Absent > Late > Present.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/records",
    params(
        ("employee_id", Query, description = "Filter by employee"),
        ("department", Query, description = "Filter by department"),
        ("status", Query, description = "Filter by resolved status"),
        ("from", Query, description = "First date, inclusive"),
        ("to", Query, description = "Last date, inclusive"),
        ("page", Query, description = "Page number"),
        ("per_page", Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Canonical daily records", body = AttendanceListResponse)
    ),
    tag = "Attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_records(
    store: web::Data<Store>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut records = reconcile(&store.punch_events());

    if let Some(employee_id) = &query.employee_id {
        records.retain(|r| &r.employee_id == employee_id);
    }
    if let Some(department) = &query.department {
        let members: Vec<String> = store
            .employees()
            .into_iter()
            .filter(|e| e.department.eq_ignore_ascii_case(department))
            .map(|e| e.id)
            .collect();
        records.retain(|r| members.contains(&r.employee_id));
    }
    if let Some(status) = query.status {
        records.retain(|r| r.status == status);
    }
    if let Some(from) = query.from {
        records.retain(|r| r.date >= from);
    }
    if let Some(to) = query.to {
        records.retain(|r| r.date <= to);
    }

    let total = records.len();
    // Widened before multiplying; u32 math would overflow on large pages.
    let offset = (page as usize - 1) * per_page as usize;
    let data: Vec<AttendanceRecord> = records
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .collect();

    Ok(HttpResponse::Ok().json(AttendanceListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Raw punch log
#[utoipa::path(
    get,
    path = "/api/v1/attendance/events",
    params(
        ("employee_id", Query, description = "Filter by employee"),
        ("from", Query, description = "First date, inclusive"),
        ("to", Query, description = "Last date, inclusive")
    ),
    responses(
        (status = 200, description = "Append-only punch events", body = [RawPunchEvent])
    ),
    tag = "Attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_events(
    store: web::Data<Store>,
    query: web::Query<AttendanceQuery>,
) -> impl Responder {
    let mut events = store.punch_events();
    if let Some(employee_id) = &query.employee_id {
        events.retain(|e| &e.employee_id == employee_id);
    }
    if let Some(from) = query.from {
        events.retain(|e| e.date >= from);
    }
    if let Some(to) = query.to {
        events.retain(|e| e.date <= to);
    }
    HttpResponse::Ok().json(events)
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct RecordPunchEvent {
    #[schema(example = "E1001")]
    pub employee_id: String,
    #[schema(example = "2024-07-11", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[serde(with = "timefmt")]
    #[schema(example = "09:05", value_type = String)]
    pub time: NaiveTime,
    pub event_type: PunchEventType,
    pub status: AttendanceStatus,
}

/// Record a punch event
///
/// Appends to the log; the id is assigned by the server. The reconciled
/// record for that day reflects the new event on the next read.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/events",
    request_body = RecordPunchEvent,
    responses(
        (status = 201, description = "Event recorded", body = RawPunchEvent),
        (status = 404, description = "Unknown employee", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn record_event(
    store: web::Data<Store>,
    payload: web::Json<RecordPunchEvent>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();

    if store.employee(&payload.employee_id).is_none() {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    let event = store.append_punch_event(
        payload.employee_id,
        payload.date,
        payload.time,
        payload.event_type,
        payload.status,
    );
    info!(event_id = event.id, employee_id = %event.employee_id, "Punch event recorded");

    Ok(HttpResponse::Created().json(event))
}

#[derive(Serialize, ToSchema)]
pub struct DailySummary {
    #[schema(example = "2024-07-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = 4)]
    pub present: usize,
    #[schema(example = 1)]
    pub late: usize,
    #[schema(example = 1)]
    pub absent: usize,
}

/// Daily attendance trend
///
/// Per-day counts of reconciled records by status, for the dashboard chart.
#[utoipa::path(
    get,
    path = "/api/v1/attendance/summary",
    params(
        ("from", Query, description = "First date, inclusive"),
        ("to", Query, description = "Last date, inclusive")
    ),
    responses(
        (status = 200, description = "Counts per day, ascending by date", body = [DailySummary])
    ),
    tag = "Attendance",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn daily_summary(
    store: web::Data<Store>,
    query: web::Query<AttendanceQuery>,
) -> impl Responder {
    let mut records = reconcile(&store.punch_events());
    if let Some(from) = query.from {
        records.retain(|r| r.date >= from);
    }
    if let Some(to) = query.to {
        records.retain(|r| r.date <= to);
    }

    let mut by_date: BTreeMap<NaiveDate, HashMap<AttendanceStatus, usize>> = BTreeMap::new();
    for record in records {
        *by_date.entry(record.date).or_default().entry(record.status).or_insert(0) += 1;
    }

    let summary: Vec<DailySummary> = by_date
        .into_iter()
        .map(|(date, counts)| DailySummary {
            date,
            present: counts.get(&AttendanceStatus::Present).copied().unwrap_or(0),
            late: counts.get(&AttendanceStatus::Late).copied().unwrap_or(0),
            absent: counts.get(&AttendanceStatus::Absent).copied().unwrap_or(0),
        })
        .collect();

    HttpResponse::Ok().json(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn reconciled_records_reflect_appended_events() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store.clone())
                .route("/attendance/events", web::post().to(record_event))
                .route("/attendance/records", web::get().to(list_records)),
        )
        .await;

        // A fresh day for Alice: entry then a later duplicate entry.
        for (time, status) in [("09:20", "Late"), ("09:02", "Present")] {
            let req = test::TestRequest::post()
                .uri("/attendance/events")
                .set_json(json!({
                    "employee_id": "E1001",
                    "date": "2024-07-12",
                    "time": time,
                    "event_type": "Entry",
                    "status": status
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get()
            .uri("/attendance/records?employee_id=E1001&from=2024-07-12&to=2024-07-12")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 1);
        let record = &body["data"][0];
        // Earliest entry wins; Late wins the status by set membership.
        assert_eq!(record["entry_time"], "09:02");
        assert_eq!(record["status"], "Late");
    }

    #[actix_web::test]
    async fn unknown_employee_punch_is_rejected() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store)
                .route("/attendance/events", web::post().to(record_event)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/attendance/events")
            .set_json(json!({
                "employee_id": "ghost",
                "date": "2024-07-12",
                "time": "09:00",
                "event_type": "Entry",
                "status": "Present"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn summary_counts_match_seed_log() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store)
                .route("/attendance/summary", web::get().to(daily_summary)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/attendance/summary?from=2024-07-01&to=2024-07-01")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        // Six employees punched on July 1: four Present, two Late.
        assert_eq!(body[0]["date"], "2024-07-01");
        assert_eq!(body[0]["present"], 4);
        assert_eq!(body[0]["late"], 2);
        assert_eq!(body[0]["absent"], 0);
    }

    #[actix_web::test]
    async fn huge_page_numbers_return_an_empty_page() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store)
                .route("/attendance/records", web::get().to(list_records)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/attendance/records?page=4294967295&per_page=100")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn absent_day_serializes_null_times() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store)
                .route("/attendance/records", web::get().to(list_records)),
        )
        .await;

        // Seed event 17: Alice absent on July 3.
        let req = test::TestRequest::get()
            .uri("/attendance/records?employee_id=E1001&from=2024-07-03&to=2024-07-03")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let record = &body["data"][0];
        assert_eq!(record["status"], "Absent");
        assert!(record["entry_time"].is_null());
        assert!(record["exit_time"].is_null());
    }
}
