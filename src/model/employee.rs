use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::role::Role;
use super::shift::ShiftAssignment;

/// Doors an employee may open within one access area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AreaAccess {
    #[schema(example = "area-01")]
    pub area_id: String,
    #[schema(example = json!(["D001", "D002"]))]
    pub door_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "E1001",
        "name": "Alice Johnson",
        "department": "Engineering",
        "enrollment_date": "2022-08-15",
        "role": "admin",
        "image_url": "https://picsum.photos/seed/2/32/32",
        "shift_assignments": [
            { "shift_id": "shift-1", "start_date": "2024-07-01", "end_date": "2024-07-15" }
        ],
        "access_rights": [
            { "area_id": "area-01", "door_ids": ["D001", "D002"] }
        ]
    })
)]
pub struct Employee {
    #[schema(example = "E1001")]
    pub id: String,

    #[schema(example = "Alice Johnson")]
    pub name: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2022-08-15", value_type = String, format = "date")]
    pub enrollment_date: NaiveDate,

    pub role: Role,

    #[schema(example = "https://picsum.photos/seed/2/32/32", nullable = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default)]
    pub shift_assignments: Vec<ShiftAssignment>,

    #[serde(default)]
    pub access_rights: Vec<AreaAccess>,
}
