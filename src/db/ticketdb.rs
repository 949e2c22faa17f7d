// db/ticketdb.rs
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::ticketmodel::{Ticket, TicketStatus};

#[async_trait]
pub trait TicketExt {
    async fn insert_ticket(&self, ticket: &Ticket) -> Result<Ticket, Error>;

    async fn get_ticket_by_id(&self, ticket_id: Uuid) -> Result<Option<Ticket>, Error>;

    /// Waiting tickets for one window, priority lane first, then FIFO.
    async fn get_waiting_for_window(&self, window: i32) -> Result<Vec<Ticket>, Error>;

    async fn get_upcoming_for_window(&self, window: i32, limit: i64) -> Result<Vec<Ticket>, Error>;

    async fn get_serving_at_window(&self, window: i32) -> Result<Vec<Ticket>, Error>;

    /// Every ticket parked in the global hold pool, unordered.
    async fn get_pending_pool(&self) -> Result<Vec<Ticket>, Error>;

    async fn get_recent_tickets(&self, limit: i64) -> Result<Vec<Ticket>, Error>;

    /// Completed tickets with their timing fields, newest completion first.
    async fn get_completed_tickets(&self) -> Result<Vec<Ticket>, Error>;

    async fn count_waiting_for_window(&self, window: i32) -> Result<i64, Error>;

    async fn count_serving_at_window(&self, window: i32) -> Result<i64, Error>;

    async fn count_by_status(&self, status: TicketStatus) -> Result<i64, Error>;

    /// Conditional write guarded on the row's prior status. Returns false
    /// when no row matched, i.e. another station already moved the ticket
    /// or the row was removed by a daily reset.
    async fn store_transition(&self, ticket: &Ticket, expected: TicketStatus)
        -> Result<bool, Error>;

    /// Atomic per-day sequence; the first call of a day returns 1.
    async fn next_ticket_sequence(&self, day: NaiveDate) -> Result<i64, Error>;

    async fn delete_all_tickets(&self) -> Result<u64, Error>;

    async fn reset_ticket_sequence(&self) -> Result<(), Error>;
}

#[async_trait]
impl TicketExt for DBClient {
    async fn insert_ticket(&self, ticket: &Ticket) -> Result<Ticket, Error> {
        let inserted = sqlx::query_as::<_, Ticket>(
            r#"INSERT INTO tickets (
                   id, ticket_number, client_name, is_priority, status,
                   current_window, remarks,
                   w1_wait_start, w2_wait_start, w3_wait_start,
                   w1_waiting_seconds, w2_waiting_seconds, w3_waiting_seconds,
                   w1_serving_seconds, w2_serving_seconds, w3_serving_seconds,
                   serving_started_at, hold_started_at, total_hold_seconds,
                   created_at, called_at, completed_at
               )
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                       $13, $14, $15, $16, $17, $18, $19, $20, $21, $22)
               RETURNING *"#,
        )
        .bind(ticket.id)
        .bind(&ticket.ticket_number)
        .bind(&ticket.client_name)
        .bind(ticket.is_priority)
        .bind(ticket.status)
        .bind(ticket.current_window)
        .bind(&ticket.remarks)
        .bind(ticket.w1_wait_start)
        .bind(ticket.w2_wait_start)
        .bind(ticket.w3_wait_start)
        .bind(ticket.w1_waiting_seconds)
        .bind(ticket.w2_waiting_seconds)
        .bind(ticket.w3_waiting_seconds)
        .bind(ticket.w1_serving_seconds)
        .bind(ticket.w2_serving_seconds)
        .bind(ticket.w3_serving_seconds)
        .bind(ticket.serving_started_at)
        .bind(ticket.hold_started_at)
        .bind(ticket.total_hold_seconds)
        .bind(ticket.created_at)
        .bind(ticket.called_at)
        .bind(ticket.completed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    async fn get_ticket_by_id(&self, ticket_id: Uuid) -> Result<Option<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(r#"SELECT * FROM tickets WHERE id = $1"#)
            .bind(ticket_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_waiting_for_window(&self, window: i32) -> Result<Vec<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(
            r#"SELECT * FROM tickets
               WHERE status = 'waiting' AND current_window = $1
               ORDER BY is_priority DESC, created_at ASC"#,
        )
        .bind(window)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_upcoming_for_window(&self, window: i32, limit: i64) -> Result<Vec<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(
            r#"SELECT * FROM tickets
               WHERE status = 'waiting' AND current_window = $1
               ORDER BY is_priority DESC, created_at ASC
               LIMIT $2"#,
        )
        .bind(window)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_serving_at_window(&self, window: i32) -> Result<Vec<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(
            r#"SELECT * FROM tickets
               WHERE status = 'serving' AND current_window = $1
               ORDER BY called_at ASC"#,
        )
        .bind(window)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_pending_pool(&self) -> Result<Vec<Ticket>, Error> {
        // Ordering is derived by the hold pool view, not persisted here.
        sqlx::query_as::<_, Ticket>(r#"SELECT * FROM tickets WHERE status = 'pending'"#)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_recent_tickets(&self, limit: i64) -> Result<Vec<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(
            r#"SELECT * FROM tickets ORDER BY created_at DESC LIMIT $1"#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_completed_tickets(&self) -> Result<Vec<Ticket>, Error> {
        sqlx::query_as::<_, Ticket>(
            r#"SELECT * FROM tickets
               WHERE status = 'done'
               ORDER BY completed_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn count_waiting_for_window(&self, window: i32) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM tickets
               WHERE status = 'waiting' AND current_window = $1"#,
        )
        .bind(window)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_serving_at_window(&self, window: i32) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM tickets
               WHERE status = 'serving' AND current_window = $1"#,
        )
        .bind(window)
        .fetch_one(&self.pool)
        .await
    }

    async fn count_by_status(&self, status: TicketStatus) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM tickets WHERE status = $1"#)
            .bind(status)
            .fetch_one(&self.pool)
            .await
    }

    async fn store_transition(
        &self,
        ticket: &Ticket,
        expected: TicketStatus,
    ) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"UPDATE tickets SET
                   client_name = $2,
                   is_priority = $3,
                   status = $4,
                   current_window = $5,
                   remarks = $6,
                   w1_wait_start = $7,
                   w2_wait_start = $8,
                   w3_wait_start = $9,
                   w1_waiting_seconds = $10,
                   w2_waiting_seconds = $11,
                   w3_waiting_seconds = $12,
                   w1_serving_seconds = $13,
                   w2_serving_seconds = $14,
                   w3_serving_seconds = $15,
                   serving_started_at = $16,
                   hold_started_at = $17,
                   total_hold_seconds = $18,
                   called_at = $19,
                   completed_at = $20
               WHERE id = $1 AND status = $21"#,
        )
        .bind(ticket.id)
        .bind(&ticket.client_name)
        .bind(ticket.is_priority)
        .bind(ticket.status)
        .bind(ticket.current_window)
        .bind(&ticket.remarks)
        .bind(ticket.w1_wait_start)
        .bind(ticket.w2_wait_start)
        .bind(ticket.w3_wait_start)
        .bind(ticket.w1_waiting_seconds)
        .bind(ticket.w2_waiting_seconds)
        .bind(ticket.w3_waiting_seconds)
        .bind(ticket.w1_serving_seconds)
        .bind(ticket.w2_serving_seconds)
        .bind(ticket.w3_serving_seconds)
        .bind(ticket.serving_started_at)
        .bind(ticket.hold_started_at)
        .bind(ticket.total_hold_seconds)
        .bind(ticket.called_at)
        .bind(ticket.completed_at)
        .bind(expected)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn next_ticket_sequence(&self, day: NaiveDate) -> Result<i64, Error> {
        sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO ticket_counters (day, value)
               VALUES ($1, 1)
               ON CONFLICT (day)
               DO UPDATE SET value = ticket_counters.value + 1
               RETURNING value"#,
        )
        .bind(day)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_all_tickets(&self) -> Result<u64, Error> {
        let result = sqlx::query(r#"DELETE FROM tickets"#)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn reset_ticket_sequence(&self) -> Result<(), Error> {
        sqlx::query(r#"DELETE FROM ticket_counters"#)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
