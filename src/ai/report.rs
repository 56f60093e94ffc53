//! Natural-language attendance report generation.
//!
//! The report request is a set of structured filters plus free-text extra
//! instructions; the output is a single generated report string. The model
//! is told to correlate the three back-end databases the dashboard fronts.

use thiserror::Error;
use tracing::error;

use super::client::{ChatClient, ChatMessage};

/// `"all"` is the accepted wildcard for employee, department, and event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportParams {
    pub date_range: String,
    pub employee_id: String,
    pub department: String,
    pub event_type: String,
    pub additional_parameters: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report request: {reason}")]
    InvalidRequest { reason: String },

    /// Network or service failure. Surfaced to the caller as-is; never
    /// retried and never cached.
    #[error("failed to generate report")]
    Generation(#[source] anyhow::Error),
}

const SYSTEM_PROMPT: &str = "You are an AI assistant that generates custom reports about \
attendance, access events, and enrollment status based on specified parameters.\n\n\
You will pull data from three distinct databases:\n\
1. Master DB (AC1): Contains employee personal data and access rights for the primary system.\n\
2. Time & Attendance DB: Contains all clock-in/clock-out records.\n\
3. Access Control DB 2: Contains access control data for a separate, secondary system.";

fn validate(params: &ReportParams) -> Result<(), ReportError> {
    let required = [
        ("date_range", &params.date_range),
        ("employee_id", &params.employee_id),
        ("department", &params.department),
        ("event_type", &params.event_type),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(ReportError::InvalidRequest {
                reason: format!("{name} must not be empty"),
            });
        }
    }
    Ok(())
}

pub fn build_prompt(params: &ReportParams) -> String {
    format!(
        "Date Range: {}\n\
         Employee ID: {}\n\
         Department: {}\n\
         Event Type: {}\n\
         Additional Parameters: {}\n\n\
         Generate a detailed report based on the above parameters, correlating data \
         from the different sources as needed. The report should be well-formatted \
         and easy to understand.",
        params.date_range,
        params.employee_id,
        params.department,
        params.event_type,
        params.additional_parameters.as_deref().unwrap_or(""),
    )
}

pub async fn generate_report(
    client: &ChatClient,
    params: &ReportParams,
) -> Result<String, ReportError> {
    validate(params)?;

    let messages = vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_prompt(params)),
    ];

    client.complete(messages).await.map_err(|e| {
        error!(error = %e, "Report generation failed");
        ReportError::Generation(e)
    })
}
