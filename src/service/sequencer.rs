// service/sequencer.rs
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};

use crate::{
    db::{db::DBClient, ticketdb::TicketExt},
    service::error::ServiceError,
};

/// Issues the human-readable daily ticket numbers (`JAN13-01`). The
/// counter row is keyed by the server-local calendar date, so numbering
/// restarts at 1 on the first issuance after midnight. The upsert in
/// `next_ticket_sequence` is atomic, so concurrent kiosks never share a
/// number; a failed registration after a successful upsert just burns
/// that number.
#[derive(Debug, Clone)]
pub struct Sequencer {
    db_client: Arc<DBClient>,
}

impl Sequencer {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn issue(&self) -> Result<String, ServiceError> {
        let today = Local::now().date_naive();
        let sequence = self
            .db_client
            .next_ticket_sequence(today)
            .await
            .map_err(|e| ServiceError::SequenceExhaustion(e.to_string()))?;

        Ok(format_ticket_number(today, sequence))
    }
}

pub fn format_ticket_number(day: NaiveDate, sequence: i64) -> String {
    format!(
        "{}{:02}-{:02}",
        day.format("%b").to_string().to_uppercase(),
        day.day(),
        sequence
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_month_day_and_sequence() {
        assert_eq!(format_ticket_number(day(2026, 1, 13), 1), "JAN13-01");
        assert_eq!(format_ticket_number(day(2026, 12, 5), 42), "DEC05-42");
    }

    #[test]
    fn pads_single_digit_sequence() {
        assert_eq!(format_ticket_number(day(2026, 7, 1), 9), "JUL01-09");
    }

    #[test]
    fn sequence_keeps_growing_past_two_digits() {
        assert_eq!(format_ticket_number(day(2026, 3, 9), 123), "MAR09-123");
    }
}
