use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum DoorStatus {
    Locked,
    Unlocked,
    Jammed,
}

/// Controller wiring for one door. Static mock data: the hardware side
/// has no protocol behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IoPorts {
    #[schema(example = 1)]
    pub input: u16,
    #[schema(example = 2)]
    pub output: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Door {
    #[schema(example = "D001")]
    pub id: String,
    #[schema(example = "Main Entrance")]
    pub name: String,
    pub status: DoorStatus,
    #[schema(example = "192.168.1.10", nullable = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[schema(example = 8080, nullable = true)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub io_ports: Option<IoPorts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccessArea {
    #[schema(example = "area-01")]
    pub id: String,
    #[schema(example = "Main Office")]
    pub name: String,
    #[schema(example = "General access area for all employees.")]
    pub description: String,
    pub doors: Vec<Door>,
}
