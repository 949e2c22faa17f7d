// service/queue_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, ticketdb::TicketExt},
    models::ticketmodel::Ticket,
    service::{
        error::ServiceError,
        lifecycle::{self, TicketAction, TimingPolicy},
        notifier::ChangeNotifier,
        sequencer::Sequencer,
    },
};

/// The authoritative write path for the ticket lifecycle. Each operation
/// is one read, one pure transition, and one status-guarded update; a
/// lost race surfaces as ConcurrentModification and is never retried
/// here — the station decides whether to refresh and try again.
#[derive(Debug, Clone)]
pub struct QueueService {
    db_client: Arc<DBClient>,
    sequencer: Sequencer,
    notifier: Arc<ChangeNotifier>,
    timing_policy: TimingPolicy,
}

impl QueueService {
    pub fn new(
        db_client: Arc<DBClient>,
        notifier: Arc<ChangeNotifier>,
        timing_policy: TimingPolicy,
    ) -> Self {
        Self {
            sequencer: Sequencer::new(db_client.clone()),
            db_client,
            notifier,
            timing_policy,
        }
    }

    /// Kiosk registration: issue a number, insert the waiting row. If the
    /// sequence is unavailable no ticket row is created.
    pub async fn register(
        &self,
        client_name: Option<String>,
        is_priority: bool,
    ) -> Result<Ticket, ServiceError> {
        if let Some(name) = &client_name {
            if name.trim().len() > 120 {
                return Err(ServiceError::Validation(
                    "Client name must be at most 120 characters".to_string(),
                ));
            }
        }

        let ticket_number = self.sequencer.issue().await?;
        let ticket = lifecycle::register_ticket(ticket_number, client_name, is_priority, Utc::now());

        let stored = self.db_client.insert_ticket(&ticket).await?;

        tracing::info!(
            "registered ticket {} for window 1 (priority: {})",
            stored.ticket_number,
            stored.is_priority
        );
        self.notifier.ticket_changed("registered", &stored);

        Ok(stored)
    }

    /// Call the head of a window's queue. Ordering is re-derived from
    /// live state on every call; returns None when nobody is waiting.
    pub async fn call_next(&self, window: i32) -> Result<Option<Ticket>, ServiceError> {
        lifecycle::validate_window(window)?;

        let waiting = self.db_client.get_waiting_for_window(window).await?;
        let Some(head) = lifecycle::order_waiting(&waiting, window).first().copied() else {
            return Ok(None);
        };

        let called = self.call(head.id, window).await?;
        Ok(Some(called))
    }

    /// Call a specific ticket — from this window's queue or from the
    /// global hold pool — into this window's serving slot.
    pub async fn call(&self, ticket_id: Uuid, window: i32) -> Result<Ticket, ServiceError> {
        self.run_transition(ticket_id, TicketAction::Call { window })
            .await
    }

    pub async fn pass(&self, ticket_id: Uuid, window: i32) -> Result<Ticket, ServiceError> {
        self.run_transition(ticket_id, TicketAction::Pass { window })
            .await
    }

    pub async fn hold(
        &self,
        ticket_id: Uuid,
        window: i32,
        reason: String,
    ) -> Result<Ticket, ServiceError> {
        self.run_transition(ticket_id, TicketAction::Hold { window, reason })
            .await
    }

    pub async fn complete(
        &self,
        ticket_id: Uuid,
        window: i32,
        force: bool,
    ) -> Result<Ticket, ServiceError> {
        self.run_transition(ticket_id, TicketAction::Complete { window, force })
            .await
    }

    pub async fn requeue(&self, ticket_id: Uuid, window: i32) -> Result<Ticket, ServiceError> {
        self.run_transition(ticket_id, TicketAction::Requeue { window })
            .await
    }

    /// The global hold pool, most recently held first. Any window may
    /// call a pooled ticket into its own serving slot.
    pub async fn pool(&self) -> Result<Vec<Ticket>, ServiceError> {
        let pending = self.db_client.get_pending_pool().await?;
        Ok(lifecycle::order_pool(&pending)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Administrative daily reset: drop every ticket row and restart the
    /// numbering sequence.
    pub async fn reset_day(&self) -> Result<u64, ServiceError> {
        let removed = self.db_client.delete_all_tickets().await?;
        self.db_client.reset_ticket_sequence().await?;

        tracing::info!("daily reset: removed {} tickets", removed);
        self.notifier.queue_reset();

        Ok(removed)
    }

    async fn run_transition(
        &self,
        ticket_id: Uuid,
        action: TicketAction,
    ) -> Result<Ticket, ServiceError> {
        let ticket = self
            .db_client
            .get_ticket_by_id(ticket_id)
            .await?
            .ok_or(ServiceError::TicketNotFound(ticket_id))?;

        let expected = ticket.status;
        let updated = lifecycle::transition(&ticket, &action, Utc::now(), self.timing_policy)?;

        let stored = self.db_client.store_transition(&updated, expected).await?;
        if !stored {
            // The guard failed: either another station won the row, or a
            // daily reset removed it between read and write.
            return Err(match self.db_client.get_ticket_by_id(ticket_id).await? {
                Some(_) => ServiceError::ConcurrentModification(ticket_id),
                None => ServiceError::TicketNotFound(ticket_id),
            });
        }

        tracing::info!(
            "ticket {} {} at window {} -> {}",
            updated.ticket_number,
            action.name(),
            action.window(),
            updated.status.to_str()
        );
        self.notifier.ticket_changed(action.name(), &updated);

        Ok(updated)
    }
}
