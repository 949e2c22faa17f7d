use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const FIRST_WINDOW: i32 = 1;
pub const LAST_WINDOW: i32 = 3;

/// Display name stored when the kiosk form is submitted blank.
pub const ANONYMOUS_CLIENT: &str = "Anonymous";

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Waiting,
    Serving,
    Pending,
    Done,
}

impl TicketStatus {
    pub fn to_str(&self) -> &str {
        match self {
            TicketStatus::Waiting => "waiting",
            TicketStatus::Serving => "serving",
            TicketStatus::Pending => "pending",
            TicketStatus::Done => "done",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct Ticket {
    pub id: Uuid,
    pub ticket_number: String,
    pub client_name: String,
    pub is_priority: bool,
    pub status: TicketStatus,
    pub current_window: i32,
    pub remarks: Option<String>,
    pub w1_wait_start: Option<DateTime<Utc>>,
    pub w2_wait_start: Option<DateTime<Utc>>,
    pub w3_wait_start: Option<DateTime<Utc>>,
    pub w1_waiting_seconds: Option<i64>,
    pub w2_waiting_seconds: Option<i64>,
    pub w3_waiting_seconds: Option<i64>,
    pub w1_serving_seconds: Option<i64>,
    pub w2_serving_seconds: Option<i64>,
    pub w3_serving_seconds: Option<i64>,
    pub serving_started_at: Option<DateTime<Utc>>,
    pub hold_started_at: Option<DateTime<Utc>>,
    pub total_hold_seconds: i64,
    pub created_at: DateTime<Utc>,
    pub called_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Explicit lifecycle value. All transition logic matches on this instead
/// of interpreting the nullable row fields; the row fields are derived
/// from transitions at the persistence boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketState {
    Waiting { window: i32 },
    Serving { window: i32, since: DateTime<Utc> },
    Pending { reason: String, held_since: DateTime<Utc> },
    Done,
}

impl Ticket {
    pub fn state(&self) -> TicketState {
        match self.status {
            TicketStatus::Waiting => TicketState::Waiting {
                window: self.current_window,
            },
            TicketStatus::Serving => TicketState::Serving {
                window: self.current_window,
                // rows written before serving capture existed may lack the timestamp
                since: self
                    .serving_started_at
                    .or(self.called_at)
                    .unwrap_or(self.created_at),
            },
            TicketStatus::Pending => TicketState::Pending {
                reason: self.remarks.clone().unwrap_or_default(),
                held_since: self.hold_started_at.unwrap_or(self.created_at),
            },
            TicketStatus::Done => TicketState::Done,
        }
    }

    pub fn wait_start(&self, window: i32) -> Option<DateTime<Utc>> {
        match window {
            1 => self.w1_wait_start,
            2 => self.w2_wait_start,
            3 => self.w3_wait_start,
            _ => None,
        }
    }

    pub fn set_wait_start(&mut self, window: i32, value: Option<DateTime<Utc>>) {
        match window {
            1 => self.w1_wait_start = value,
            2 => self.w2_wait_start = value,
            3 => self.w3_wait_start = value,
            _ => {}
        }
    }

    pub fn waiting_seconds(&self, window: i32) -> Option<i64> {
        match window {
            1 => self.w1_waiting_seconds,
            2 => self.w2_waiting_seconds,
            3 => self.w3_waiting_seconds,
            _ => None,
        }
    }

    pub fn set_waiting_seconds(&mut self, window: i32, value: i64) {
        match window {
            1 => self.w1_waiting_seconds = Some(value),
            2 => self.w2_waiting_seconds = Some(value),
            3 => self.w3_waiting_seconds = Some(value),
            _ => {}
        }
    }

    pub fn serving_seconds(&self, window: i32) -> Option<i64> {
        match window {
            1 => self.w1_serving_seconds,
            2 => self.w2_serving_seconds,
            3 => self.w3_serving_seconds,
            _ => None,
        }
    }

    pub fn set_serving_seconds(&mut self, window: i32, value: i64) {
        match window {
            1 => self.w1_serving_seconds = Some(value),
            2 => self.w2_serving_seconds = Some(value),
            3 => self.w3_serving_seconds = Some(value),
            _ => {}
        }
    }
}

pub fn window_label(window: i32) -> &'static str {
    match window {
        1 => "Screening",
        2 => "Payment",
        3 => "Releasing",
        _ => "Unknown",
    }
}
