use serde::{Deserialize, Serialize};

pub const MARQUEE_TEXT: &str = "marquee_text";
pub const SIDEBAR_ANNOUNCEMENT: &str = "sidebar_announcement";

pub const DEFAULT_MARQUEE: &str =
    "Welcome to the Municipal Service Center. Please wait for your number.";
pub const DEFAULT_SIDEBAR: &str = "Please have your ID and requirements ready.";

/// One named display string, mutated only by admin actions.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Setting {
    pub id: String,
    pub value: String,
}
