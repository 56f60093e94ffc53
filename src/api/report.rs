use crate::ai::{
    client::ChatClient,
    report::{ReportError, ReportParams, generate_report},
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct GenerateReportRequest {
    #[schema(example = "2024-07-01 to 2024-07-10")]
    pub date_range: String,
    /// Employee id, or "all".
    #[schema(example = "all")]
    pub employee_id: String,
    /// Department name, or "all".
    #[schema(example = "Engineering")]
    pub department: String,
    /// Event type, or "all".
    #[schema(example = "Entry")]
    pub event_type: String,
    #[schema(example = "Highlight late arrivals", nullable = true)]
    pub additional_parameters: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct GenerateReportResponse {
    pub report: String,
}

/// Generate an attendance report
///
/// Sends one request to the hosted language model. A service failure is a
/// tagged error for the caller: nothing is retried, cached, or substituted.
#[utoipa::path(
    post,
    path = "/api/v1/reports/generate",
    request_body = GenerateReportRequest,
    responses(
        (status = 200, description = "Generated report", body = GenerateReportResponse),
        (status = 400, description = "Missing filter parameter", body = Object, example = json!({
            "message": "invalid report request: date_range must not be empty"
        })),
        (status = 502, description = "Report service failure", body = Object, example = json!({
            "message": "Failed to generate report."
        }))
    ),
    tag = "Reports",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn generate(
    client: web::Data<ChatClient>,
    payload: web::Json<GenerateReportRequest>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let params = ReportParams {
        date_range: payload.date_range,
        employee_id: payload.employee_id,
        department: payload.department,
        event_type: payload.event_type,
        additional_parameters: payload.additional_parameters,
    };

    match generate_report(client.get_ref(), &params).await {
        Ok(report) => {
            info!("Report generated");
            Ok(HttpResponse::Ok().json(GenerateReportResponse { report }))
        }
        Err(e @ ReportError::InvalidRequest { .. }) => Ok(HttpResponse::BadRequest().json(json!({
            "message": e.to_string()
        }))),
        Err(ReportError::Generation(e)) => {
            error!(error = %e, "Report service call failed");
            Ok(HttpResponse::BadGateway().json(json!({
                "message": "Failed to generate report."
            })))
        }
    }
}
