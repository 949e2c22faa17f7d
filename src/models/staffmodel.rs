use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "staff_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Master,
    Staff,
}

impl StaffRole {
    pub fn to_str(&self) -> &str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Master => "master",
            StaffRole::Staff => "staff",
        }
    }

    /// Admin and master stations may act on any window; plain staff only
    /// on their assigned one.
    pub fn can_act_on_any_window(&self) -> bool {
        matches!(self, StaffRole::Admin | StaffRole::Master)
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct StaffProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    pub window_number: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
