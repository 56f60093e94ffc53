use crate::{
    auth::auth::AuthUser,
    domain::shift_assignment::{DateRange, assign_shift},
    model::{employee::Employee, shift::Shift, timefmt},
    store::Store,
};
use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

/// Shift reference list
#[utoipa::path(
    get,
    path = "/api/v1/shifts",
    responses(
        (status = 200, description = "All defined shifts", body = [Shift])
    ),
    tag = "Shift",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_shifts(store: web::Data<Store>) -> impl Responder {
    HttpResponse::Ok().json(store.shifts())
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct UpdateShift {
    #[schema(example = "Day Shift")]
    pub name: Option<String>,
    #[serde(default, with = "timefmt::option")]
    #[schema(example = "09:00", value_type = Option<String>, nullable = true)]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "timefmt::option")]
    #[schema(example = "17:00", value_type = Option<String>, nullable = true)]
    pub end_time: Option<NaiveTime>,
    #[schema(example = 10)]
    pub grace_period: Option<u32>,
}

/// Update a shift definition
///
/// Admin settings operation; assignments referencing the shift keep their
/// date ranges and follow the new definition.
#[utoipa::path(
    put,
    path = "/api/v1/shifts/{shift_id}",
    params(
        ("shift_id", Path, description = "Shift ID")
    ),
    request_body = UpdateShift,
    responses(
        (status = 200, description = "Shift updated", body = Shift),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown shift", body = Object, example = json!({
            "message": "Shift not found"
        }))
    ),
    tag = "Shift",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_shift(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UpdateShift>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    let shift_id = path.into_inner();
    let body = body.into_inner();

    let updated = store.update_shift(&shift_id, |shift| {
        if let Some(name) = body.name {
            shift.name = name;
        }
        if let Some(start_time) = body.start_time {
            shift.start_time = start_time;
        }
        if let Some(end_time) = body.end_time {
            shift.end_time = end_time;
        }
        if let Some(grace_period) = body.grace_period {
            shift.grace_period = grace_period;
        }
    });

    match updated {
        Some(shift) => {
            info!(shift_id = %shift.id, "Shift definition updated");
            Ok(HttpResponse::Ok().json(shift))
        }
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Shift not found"
        }))),
    }
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct AssignShiftRequest {
    #[schema(example = json!(["E1001", "E1002"]))]
    pub employee_ids: Vec<String>,
    #[schema(example = "shift-2")]
    pub shift_id: String,
    #[schema(example = "2024-07-16", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-07-31", format = "date", value_type = String)]
    pub end_date: NaiveDate,
}

#[derive(Serialize, ToSchema)]
pub struct AssignShiftResponse {
    /// Targeted ids that matched an enrolled employee.
    #[schema(example = 2)]
    pub assigned: usize,
    pub employees: Vec<Employee>,
}

/// Bulk shift assignment
///
/// Applies the shift to every targeted employee over the date range.
/// Existing assignments whose range intersects the new one are dropped
/// wholesale before the new assignment is appended.
#[utoipa::path(
    post,
    path = "/api/v1/shifts/assign",
    request_body = AssignShiftRequest,
    responses(
        (status = 200, description = "Roster updated", body = AssignShiftResponse),
        (status = 400, description = "Invalid assignment request", body = Object, example = json!({
            "message": "invalid assignment request: start date is after end date"
        })),
        (status = 403, description = "Caller is not a supervisor or admin"),
        (status = 404, description = "Unknown shift", body = Object, example = json!({
            "message": "Shift not found"
        }))
    ),
    tag = "Shift",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn assign(
    auth: AuthUser,
    store: web::Data<Store>,
    payload: web::Json<AssignShiftRequest>,
) -> actix_web::Result<impl Responder> {
    auth.require_supervisor_or_admin()?;
    let payload = payload.into_inner();

    // Referential check belongs here, not in the resolver: the resolver
    // only sees opaque ids.
    if !payload.shift_id.is_empty() && store.shift(&payload.shift_id).is_none() {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Shift not found"
        })));
    }

    let target_ids: std::collections::HashSet<String> =
        payload.employee_ids.iter().cloned().collect();
    let range = DateRange {
        start: payload.start_date,
        end: payload.end_date,
    };

    // The resolver runs under the store's write lock so a concurrent
    // enrollment cannot be lost to a stale roster snapshot.
    let updated = match store
        .update_employees(|employees| assign_shift(employees, &target_ids, &payload.shift_id, range))
    {
        Ok(updated) => updated,
        // Precondition failure: surface the message, change nothing.
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": e.to_string()
            })));
        }
    };

    let assigned = updated
        .iter()
        .filter(|e| target_ids.contains(&e.id))
        .count();
    info!(
        shift_id = %payload.shift_id,
        assigned,
        start = %range.start,
        end = %range.end,
        "Shift assigned"
    );

    Ok(HttpResponse::Ok().json(AssignShiftResponse {
        assigned,
        employees: updated,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::generate_access_token;
    use crate::config::Config;
    use crate::model::role::Role;
    use actix_web::{App, http::StatusCode, test};

    fn bearer(role: Role) -> String {
        let config = Config::for_tests();
        let token = generate_access_token(
            1,
            "tester".to_string(),
            role.as_id(),
            None,
            &config.jwt_secret,
            config.access_token_ttl,
        );
        format!("Bearer {token}")
    }

    async fn post_assign_as(
        role: Role,
        store: web::Data<Store>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(store)
                .app_data(web::Data::new(Config::for_tests()))
                .route("/shifts/assign", web::post().to(assign)),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/shifts/assign")
            .insert_header(("Authorization", bearer(role)))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        let body = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
        };
        (status, body)
    }

    async fn post_assign(
        store: web::Data<Store>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        post_assign_as(Role::Supervisor, store, body).await
    }

    #[actix_web::test]
    async fn assignment_updates_the_stored_roster() {
        let store = web::Data::new(Store::seeded());
        let (status, body) = post_assign(
            store.clone(),
            json!({
                "employee_ids": ["E1002"],
                "shift_id": "shift-3",
                "start_date": "2024-08-01",
                "end_date": "2024-08-15"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assigned"], 1);

        let bob = store.employee("E1002").unwrap();
        assert_eq!(bob.shift_assignments.len(), 2);
        assert_eq!(bob.shift_assignments.last().unwrap().shift_id, "shift-3");
    }

    #[actix_web::test]
    async fn inverted_range_is_rejected_without_changes() {
        let store = web::Data::new(Store::seeded());
        let before = store.employee("E1002").unwrap();

        let (status, body) = post_assign(
            store.clone(),
            json!({
                "employee_ids": ["E1002"],
                "shift_id": "shift-1",
                "start_date": "2024-08-15",
                "end_date": "2024-08-01"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("start date is after end date"));
        assert_eq!(store.employee("E1002").unwrap(), before);
    }

    #[actix_web::test]
    async fn unknown_shift_is_not_found() {
        let store = web::Data::new(Store::seeded());
        let (status, _) = post_assign(
            store,
            json!({
                "employee_ids": ["E1001"],
                "shift_id": "shift-99",
                "start_date": "2024-08-01",
                "end_date": "2024-08-15"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn empty_selection_is_a_bad_request() {
        let store = web::Data::new(Store::seeded());
        let (status, body) = post_assign(
            store,
            json!({
                "employee_ids": [],
                "shift_id": "shift-1",
                "start_date": "2024-08-01",
                "end_date": "2024-08-15"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("no employees selected"));
    }

    #[actix_web::test]
    async fn admin_can_edit_a_shift_definition() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store.clone())
                .app_data(web::Data::new(Config::for_tests()))
                .route("/shifts/{id}", web::put().to(update_shift)),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/shifts/shift-1")
            .insert_header(("Authorization", bearer(Role::Admin)))
            .set_json(json!({ "start_time": "08:30", "grace_period": 15 }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["start_time"], "08:30");
        assert_eq!(body["grace_period"], 15);
        // Untouched fields survive.
        assert_eq!(body["name"], "Day Shift");

        assert_eq!(store.shift("shift-1").unwrap().grace_period, 15);
    }

    #[actix_web::test]
    async fn shift_edits_are_admin_only() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store.clone())
                .app_data(web::Data::new(Config::for_tests()))
                .route("/shifts/{id}", web::put().to(update_shift)),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/shifts/shift-1")
            .insert_header(("Authorization", bearer(Role::Supervisor)))
            .set_json(json!({ "grace_period": 0 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(store.shift("shift-1").unwrap().grace_period, 10);
    }

    #[actix_web::test]
    async fn plain_employee_cannot_assign() {
        let store = web::Data::new(Store::seeded());
        let before = store.employee("E1002").unwrap();

        let (status, _) = post_assign_as(
            Role::Employee,
            store.clone(),
            json!({
                "employee_ids": ["E1002"],
                "shift_id": "shift-3",
                "start_date": "2024-08-01",
                "end_date": "2024-08-15"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(store.employee("E1002").unwrap(), before);
    }
}
