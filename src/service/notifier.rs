// service/notifier.rs
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::ticketmodel::{Ticket, TicketStatus};

pub const TOPIC_TICKETS: &str = "tickets";
pub const TOPIC_SETTINGS: &str = "settings";

/// Broadcast payload. Deliberately thin: subscribers re-query their view
/// instead of trusting event fields, so dropped or reordered deliveries
/// repair themselves on the next event.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    pub topic: &'static str,
    pub action: &'static str,
    pub ticket_id: Option<Uuid>,
    pub ticket_number: Option<String>,
    pub window: Option<i32>,
    pub status: Option<TicketStatus>,
}

/// Fan-out bus for "something changed" events. Every successful
/// transition publishes here; staff consoles, the master panel, the
/// public monitor and the admin dashboard subscribe through the SSE
/// endpoint.
#[derive(Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<ChangeEvent>,
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.tx.receiver_count())
            .finish()
    }
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: ChangeEvent) {
        tracing::debug!(
            "change event: {} {} (ticket {:?})",
            event.topic,
            event.action,
            event.ticket_number
        );
        // No subscribers is fine; the monitor may simply not be open.
        let _ = self.tx.send(event);
    }

    pub fn ticket_changed(&self, action: &'static str, ticket: &Ticket) {
        self.publish(ChangeEvent {
            topic: TOPIC_TICKETS,
            action,
            ticket_id: Some(ticket.id),
            ticket_number: Some(ticket.ticket_number.clone()),
            window: Some(ticket.current_window),
            status: Some(ticket.status),
        });
    }

    pub fn queue_reset(&self) {
        self.publish(ChangeEvent {
            topic: TOPIC_TICKETS,
            action: "reset",
            ticket_id: None,
            ticket_number: None,
            window: None,
            status: None,
        });
    }

    pub fn settings_changed(&self) {
        self.publish(ChangeEvent {
            topic: TOPIC_SETTINGS,
            action: "updated",
            ticket_id: None,
            ticket_number: None,
            window: None,
            status: None,
        });
    }
}
