use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{settingsmodel::Setting, staffmodel::{StaffProfile, StaffRole}};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStaffDto {
    pub role: Option<StaffRole>,
    pub window_number: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffData {
    pub profile: StaffProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffResponseDto {
    pub status: String,
    pub data: StaffData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StaffListResponseDto {
    pub status: String,
    pub staff: Vec<StaffProfile>,
    pub results: i64,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SettingsUpdateDto {
    #[validate(length(max = 500, message = "Marquee text must be at most 500 characters"))]
    pub marquee_text: Option<String>,

    #[validate(length(max = 500, message = "Advisory text must be at most 500 characters"))]
    pub sidebar_announcement: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsResponseDto {
    pub status: String,
    pub settings: Vec<Setting>,
}
