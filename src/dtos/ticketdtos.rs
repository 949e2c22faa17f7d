use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::ticketmodel::Ticket;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterTicketDto {
    #[validate(length(max = 120, message = "Name must be at most 120 characters"))]
    pub client_name: Option<String>,

    #[serde(default)]
    pub is_priority: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CallTicketDto {
    /// Absent: call the head of the window's queue. Present: call this
    /// ticket (from the waiting list or the hold pool).
    pub ticket_id: Option<Uuid>,
    pub window: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketActionDto {
    pub ticket_id: Uuid,
    pub window: Option<i32>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct HoldTicketDto {
    pub ticket_id: Uuid,
    pub window: Option<i32>,

    #[validate(length(max = 300, message = "Reason must be at most 300 characters"))]
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteTicketDto {
    pub ticket_id: Uuid,
    pub window: Option<i32>,

    /// Admin/master only: finish a ticket before the releasing window.
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowQueryDto {
    pub window: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketData {
    pub ticket: Ticket,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketResponseDto {
    pub status: String,
    pub data: TicketData,
}

impl TicketResponseDto {
    pub fn of(ticket: Ticket) -> Self {
        TicketResponseDto {
            status: "success".to_string(),
            data: TicketData { ticket },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketListResponseDto {
    pub status: String,
    pub tickets: Vec<Ticket>,
    pub results: i64,
}

impl TicketListResponseDto {
    pub fn of(tickets: Vec<Ticket>) -> Self {
        TicketListResponseDto {
            status: "success".to_string(),
            results: tickets.len() as i64,
            tickets,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowStatusDto {
    pub status: String,
    pub window: i32,
    pub waiting_count: i64,
    pub serving: Vec<Ticket>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowBoardDto {
    pub window: i32,
    pub label: String,
    pub serving: Vec<Ticket>,
    pub upcoming: Vec<Ticket>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonitorBoardDto {
    pub status: String,
    pub windows: Vec<WindowBoardDto>,
    pub marquee_text: String,
    pub sidebar_announcement: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WindowActivityDto {
    pub window: i32,
    pub serving: i64,
    pub waiting: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OverviewResponseDto {
    pub status: String,
    pub waiting: i64,
    pub serving: i64,
    pub pending: i64,
    pub done: i64,
    pub windows: Vec<WindowActivityDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponseDto {
    pub status: String,
    pub removed: u64,
}
