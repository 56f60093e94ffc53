use crate::{
    auth::auth::AuthUser,
    model::{employee::Employee, role::Role},
    store::Store,
};
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "E1007", value_type = String)]
    pub id: String,
    #[schema(example = "Grace Hopper", value_type = String)]
    pub name: String,
    #[schema(example = "Engineering", value_type = String)]
    pub department: String,
    pub role: Role,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub enrollment_date: NaiveDate,
    #[schema(example = "https://picsum.photos/seed/8/32/32", nullable = true)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub department: Option<String>,
    pub role: Option<Role>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 5)]
    pub per_page: u32,
    #[schema(example = 10)]
    pub total: usize,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub department: Option<String>,
    pub role: Option<Role>,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub enrollment_date: Option<NaiveDate>,
    pub image_url: Option<String>,
}

/// Enroll Employee
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee enrolled", body = Employee),
        (status = 409, description = "Employee id already enrolled", body = Object, example = json!({
            "message": "Employee id already enrolled"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_employee(
    store: web::Data<Store>,
    payload: web::Json<CreateEmployee>,
) -> impl Responder {
    let payload = payload.into_inner();
    let employee = Employee {
        id: payload.id,
        name: payload.name,
        department: payload.department,
        enrollment_date: payload.enrollment_date,
        role: payload.role,
        image_url: payload.image_url,
        shift_assignments: Vec::new(),
        access_rights: Vec::new(),
    };

    match store.insert_employee(employee.clone()) {
        Ok(()) => {
            info!(employee_id = %employee.id, "Employee enrolled");
            HttpResponse::Created().json(employee)
        }
        Err(_) => HttpResponse::Conflict().json(json!({
            "message": "Employee id already enrolled"
        })),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(
        ("page",  Query, description = "Page number"),
        ("per_page", Query, description = "Items per page"),
        ("department", Query, description = "Filter by department"),
        ("role", Query, description = "Filter by role"),
        ("search", Query, description = "Search by name or id")
    ),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_employees(
    store: web::Data<Store>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    // Widened before multiplying; u32 math would overflow on large pages.
    let offset = (page as usize - 1) * per_page as usize;

    debug!(?query, "Listing employees");

    let mut employees = store.employees();

    if let Some(department) = &query.department {
        employees.retain(|e| e.department.eq_ignore_ascii_case(department));
    }
    if let Some(role) = query.role {
        employees.retain(|e| e.role == role);
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        employees.retain(|e| {
            e.name.to_lowercase().contains(&needle) || e.id.to_lowercase().contains(&needle)
        });
    }

    let total = employees.len();
    let data: Vec<Employee> = employees
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .collect();

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data,
        page,
        per_page,
        total,
    }))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_employee(
    store: web::Data<Store>,
    path: web::Path<String>,
    body: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let body = body.into_inner();

    let updated = store.update_employee(&employee_id, |employee| {
        if let Some(name) = body.name {
            employee.name = name;
        }
        if let Some(department) = body.department {
            employee.department = department;
        }
        if let Some(role) = body.role {
            employee.role = role;
        }
        if let Some(enrollment_date) = body.enrollment_date {
            employee.enrollment_date = enrollment_date;
        }
        if let Some(image_url) = body.image_url {
            employee.image_url = Some(image_url);
        }
    });

    match updated {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_employee(
    auth: AuthUser,
    store: web::Data<Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;
    let employee_id = path.into_inner();

    if store.delete_employee(&employee_id) {
        info!(employee_id = %employee_id, "Employee deleted");
        Ok(HttpResponse::Ok().json(json!({
            "message": "Successfully deleted"
        })))
    } else {
        Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })))
    }
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_employee(
    store: web::Data<Store>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    match store.employee(&employee_id) {
        Some(employee) => Ok(HttpResponse::Ok().json(employee)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Distinct departments derived from the enrolled roster.
#[utoipa::path(
    get,
    path = "/api/v1/employees/departments",
    responses(
        (status = 200, description = "Department names", body = Object, example = json!({
            "departments": ["Engineering", "Marketing"]
        }))
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_departments(store: web::Data<Store>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "departments": store.departments()
    }))
}
