use std::collections::HashMap;

use crate::{
    auth::auth::AuthUser,
    model::{
        access::{AccessArea, DoorStatus, IoPorts},
        employee::AreaAccess,
    },
    store::Store,
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

/// Access areas with their doors
#[utoipa::path(
    get,
    path = "/api/v1/access/areas",
    responses(
        (status = 200, description = "All areas and door states", body = [AccessArea])
    ),
    tag = "Access",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_areas(store: web::Data<Store>) -> impl Responder {
    HttpResponse::Ok().json(store.areas())
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct SetDoorStatus {
    pub status: DoorStatus,
}

/// Set a door's status
///
/// Mock state only; there is no hardware protocol behind it.
#[utoipa::path(
    put,
    path = "/api/v1/access/areas/{area_id}/doors/{door_id}",
    params(
        ("area_id", Path, description = "Access area ID"),
        ("door_id", Path, description = "Door ID")
    ),
    request_body = SetDoorStatus,
    responses(
        (status = 200, description = "Updated area", body = AccessArea),
        (status = 404, description = "Unknown area or door", body = Object, example = json!({
            "message": "Area or door not found"
        }))
    ),
    tag = "Access",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_door_status(
    store: web::Data<Store>,
    path: web::Path<(String, String)>,
    payload: web::Json<SetDoorStatus>,
) -> actix_web::Result<impl Responder> {
    let (area_id, door_id) = path.into_inner();

    match store.set_door_status(&area_id, &door_id, payload.status) {
        Some(area) => {
            info!(area_id = %area_id, door_id = %door_id, status = %payload.status, "Door status set");
            Ok(HttpResponse::Ok().json(area))
        }
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Area or door not found"
        }))),
    }
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct UpdateDoorConfig {
    #[schema(example = "Main Entrance")]
    pub name: Option<String>,
    #[schema(example = "192.168.1.10", nullable = true)]
    pub ip: Option<String>,
    #[schema(example = 8080, nullable = true)]
    pub port: Option<u16>,
    pub io_ports: Option<IoPorts>,
}

/// Update a door's device configuration
///
/// Admin settings operation over the mock controller wiring (name, ip,
/// port, io ports). Status changes go through the status endpoint.
#[utoipa::path(
    put,
    path = "/api/v1/access/areas/{area_id}/doors/{door_id}/config",
    params(
        ("area_id", Path, description = "Access area ID"),
        ("door_id", Path, description = "Door ID")
    ),
    request_body = UpdateDoorConfig,
    responses(
        (status = 200, description = "Updated area", body = AccessArea),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown area or door", body = Object, example = json!({
            "message": "Area or door not found"
        }))
    ),
    tag = "Access",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_door_config(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<(String, String)>,
    payload: web::Json<UpdateDoorConfig>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    let (area_id, door_id) = path.into_inner();
    let payload = payload.into_inner();

    let updated = store.update_door(&area_id, &door_id, |door| {
        if let Some(name) = payload.name {
            door.name = name;
        }
        if let Some(ip) = payload.ip {
            door.ip = Some(ip);
        }
        if let Some(port) = payload.port {
            door.port = Some(port);
        }
        if let Some(io_ports) = payload.io_ports {
            door.io_ports = Some(io_ports);
        }
    });

    match updated {
        Some(area) => {
            info!(area_id = %area_id, door_id = %door_id, "Door device config updated");
            Ok(HttpResponse::Ok().json(area))
        }
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Area or door not found"
        }))),
    }
}

#[derive(Deserialize, Serialize, ToSchema)]
pub struct UpdateAccessRights {
    pub access_rights: Vec<AreaAccess>,
}

/// Replace an employee's access rights
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}/access",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateAccessRights,
    responses(
        (status = 200, description = "Updated employee", body = crate::model::employee::Employee),
        (status = 400, description = "Unknown area or door id in rights", body = Object, example = json!({
            "message": "Unknown area: area-99"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Access",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_access_rights(
    store: web::Data<Store>,
    path: web::Path<String>,
    payload: web::Json<UpdateAccessRights>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let rights = payload.into_inner().access_rights;

    // Rights must reference defined areas and doors.
    let areas = store.areas();
    for grant in &rights {
        let Some(area) = areas.iter().find(|a| a.id == grant.area_id) else {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": format!("Unknown area: {}", grant.area_id)
            })));
        };
        for door_id in &grant.door_ids {
            if !area.doors.iter().any(|d| &d.id == door_id) {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "message": format!("Unknown door in {}: {door_id}", grant.area_id)
                })));
            }
        }
    }

    match store.set_access_rights(&employee_id, rights) {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

#[derive(Serialize, ToSchema)]
pub struct DoorStatusSummary {
    pub status: DoorStatus,
    #[schema(example = 5)]
    pub count: usize,
}

/// Door status overview
#[utoipa::path(
    get,
    path = "/api/v1/access/summary",
    responses(
        (status = 200, description = "Door counts by status", body = [DoorStatusSummary])
    ),
    tag = "Access",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn door_summary(store: web::Data<Store>) -> impl Responder {
    let mut counts: HashMap<DoorStatus, usize> = HashMap::new();
    for area in store.areas() {
        for door in area.doors {
            *counts.entry(door.status).or_insert(0) += 1;
        }
    }

    let mut summary: Vec<DoorStatusSummary> = counts
        .into_iter()
        .map(|(status, count)| DoorStatusSummary { status, count })
        .collect();
    summary.sort_by_key(|s| std::cmp::Reverse(s.count));

    HttpResponse::Ok().json(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn door_status_update_round_trips() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new().app_data(store.clone()).route(
                "/access/areas/{area_id}/doors/{door_id}",
                web::put().to(set_door_status),
            ),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/access/areas/area-01/doors/D003")
            .set_json(json!({ "status": "Unlocked" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let door = body["doors"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["id"] == "D003")
            .unwrap();
        assert_eq!(door["status"], "Unlocked");

        let area = store.area("area-01").unwrap();
        assert_eq!(
            area.doors.iter().find(|d| d.id == "D003").unwrap().status,
            DoorStatus::Unlocked
        );
    }

    #[actix_web::test]
    async fn unknown_door_is_not_found() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new().app_data(store).route(
                "/access/areas/{area_id}/doors/{door_id}",
                web::put().to(set_door_status),
            ),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/access/areas/area-01/doors/D999")
            .set_json(json!({ "status": "Locked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn admin_can_rewire_a_door() {
        let config = crate::config::Config::for_tests();
        let token = crate::auth::jwt::generate_access_token(
            1,
            "tester".to_string(),
            crate::model::role::Role::Admin.as_id(),
            None,
            &config.jwt_secret,
            config.access_token_ttl,
        );

        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store.clone())
                .app_data(web::Data::new(config))
                .route(
                    "/access/areas/{area_id}/doors/{door_id}/config",
                    web::put().to(update_door_config),
                ),
        )
        .await;

        // D201 ships without controller wiring.
        let req = test::TestRequest::put()
            .uri("/access/areas/area-03/doors/D201/config")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "ip": "192.168.3.10",
                "port": 9100,
                "io_ports": { "input": 5, "output": 6 }
            }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let door = body["doors"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["id"] == "D201")
            .unwrap();
        assert_eq!(door["ip"], "192.168.3.10");
        assert_eq!(door["port"], 9100);
        assert_eq!(door["io_ports"]["input"], 5);

        let area = store.area("area-03").unwrap();
        let wired = area.doors.iter().find(|d| d.id == "D201").unwrap();
        assert_eq!(wired.port, Some(9100));
    }

    #[actix_web::test]
    async fn rights_referencing_unknown_door_are_rejected() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store.clone())
                .route("/employees/{id}/access", web::put().to(update_access_rights)),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/employees/E1001/access")
            .set_json(json!({
                "access_rights": [
                    { "area_id": "area-01", "door_ids": ["D001", "D999"] }
                ]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // Unchanged on failure.
        assert_eq!(store.employee("E1001").unwrap().access_rights.len(), 2);
    }

    #[actix_web::test]
    async fn seed_door_counts_add_up() {
        let store = web::Data::new(Store::seeded());
        let app = test::init_service(
            App::new()
                .app_data(store)
                .route("/access/summary", web::get().to(door_summary)),
        )
        .await;

        let req = test::TestRequest::get().uri("/access/summary").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let total: u64 = body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["count"].as_u64().unwrap())
            .sum();
        assert_eq!(total, 10);
    }
}
