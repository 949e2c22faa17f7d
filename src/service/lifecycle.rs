// service/lifecycle.rs
//
// Pure transition engine for the ticket lifecycle. Every function here
// works on plain ticket values supplied by the caller; the one
// authoritative read-modify-write lives in QueueService, which feeds the
// result of `transition` into a status-guarded update.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    models::ticketmodel::{
        Ticket, TicketState, TicketStatus, ANONYMOUS_CLIENT, FIRST_WINDOW, LAST_WINDOW,
    },
    service::error::ServiceError,
};

/// What to do when a stage duration is recorded a second time (a ticket
/// re-entering a window it already visited). `Overwrite` replaces the
/// value, `Reject` keeps the first one; both log a warning and neither
/// accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingPolicy {
    Overwrite,
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TicketAction {
    Call { window: i32 },
    Pass { window: i32 },
    Hold { window: i32, reason: String },
    Complete { window: i32, force: bool },
    Requeue { window: i32 },
}

impl TicketAction {
    pub fn name(&self) -> &'static str {
        match self {
            TicketAction::Call { .. } => "call",
            TicketAction::Pass { .. } => "pass",
            TicketAction::Hold { .. } => "hold",
            TicketAction::Complete { .. } => "complete",
            TicketAction::Requeue { .. } => "requeue",
        }
    }

    pub fn window(&self) -> i32 {
        match self {
            TicketAction::Call { window }
            | TicketAction::Pass { window }
            | TicketAction::Hold { window, .. }
            | TicketAction::Complete { window, .. }
            | TicketAction::Requeue { window } => *window,
        }
    }
}

pub fn validate_window(window: i32) -> Result<(), ServiceError> {
    if (FIRST_WINDOW..=LAST_WINDOW).contains(&window) {
        Ok(())
    } else {
        Err(ServiceError::InvalidWindow(window))
    }
}

/// Build the row for a freshly registered ticket: waiting at window 1
/// with its wait clock started.
pub fn register_ticket(
    ticket_number: String,
    client_name: Option<String>,
    is_priority: bool,
    now: DateTime<Utc>,
) -> Ticket {
    let client_name = client_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| ANONYMOUS_CLIENT.to_string());

    Ticket {
        id: Uuid::new_v4(),
        ticket_number,
        client_name,
        is_priority,
        status: TicketStatus::Waiting,
        current_window: FIRST_WINDOW,
        remarks: None,
        w1_wait_start: Some(now),
        w2_wait_start: None,
        w3_wait_start: None,
        w1_waiting_seconds: None,
        w2_waiting_seconds: None,
        w3_waiting_seconds: None,
        w1_serving_seconds: None,
        w2_serving_seconds: None,
        w3_serving_seconds: None,
        serving_started_at: None,
        hold_started_at: None,
        total_hold_seconds: 0,
        created_at: now,
        called_at: None,
        completed_at: None,
    }
}

/// Apply one staff action to a ticket snapshot, producing the next row
/// value. Rejects anything the current state does not permit; never
/// mutates more than one logical step.
pub fn transition(
    ticket: &Ticket,
    action: &TicketAction,
    now: DateTime<Utc>,
    policy: TimingPolicy,
) -> Result<Ticket, ServiceError> {
    validate_window(action.window())?;

    match action {
        TicketAction::Call { window } => call(ticket, *window, now, policy),
        TicketAction::Pass { window } => pass(ticket, *window, now, policy),
        TicketAction::Hold { window, reason } => hold(ticket, *window, reason, now, policy),
        TicketAction::Complete { window, force } => complete(ticket, *window, *force, now, policy),
        TicketAction::Requeue { window } => requeue(ticket, *window, now, policy),
    }
}

fn call(
    ticket: &Ticket,
    window: i32,
    now: DateTime<Utc>,
    policy: TimingPolicy,
) -> Result<Ticket, ServiceError> {
    let mut next = ticket.clone();

    match ticket.state() {
        TicketState::Waiting { window: w } if w == window => {}
        TicketState::Pending { held_since, .. } => {
            // Cross-window reactivation: the hold episode ends here and is
            // excluded from wait/serve accounting.
            let held = (now - held_since).num_seconds().max(0);
            next.total_hold_seconds += held;
            next.hold_started_at = None;
            next.remarks = None;
        }
        _ => {
            return Err(ServiceError::InvalidTransition(
                ticket.id,
                "call",
                ticket.status,
            ))
        }
    }

    if let Some(wait_start) = ticket.wait_start(window) {
        let waited = (now - wait_start).num_seconds().max(0);
        record_waiting(&mut next, window, waited, policy);
    }

    next.status = TicketStatus::Serving;
    next.current_window = window;
    next.serving_started_at = Some(now);
    next.called_at = Some(now);

    Ok(next)
}

fn pass(
    ticket: &Ticket,
    window: i32,
    now: DateTime<Utc>,
    policy: TimingPolicy,
) -> Result<Ticket, ServiceError> {
    if window >= LAST_WINDOW {
        return Err(ServiceError::InvalidTransition(
            ticket.id,
            "pass",
            ticket.status,
        ));
    }

    let mut next = leave_serving(ticket, window, "pass", now, policy)?;

    next.status = TicketStatus::Waiting;
    next.current_window = window + 1;
    next.set_wait_start(window + 1, Some(now));
    next.remarks = None;

    Ok(next)
}

fn hold(
    ticket: &Ticket,
    window: i32,
    reason: &str,
    now: DateTime<Utc>,
    policy: TimingPolicy,
) -> Result<Ticket, ServiceError> {
    let mut next = leave_serving(ticket, window, "hold", now, policy)?;

    let reason = reason.trim();
    let reason = if reason.is_empty() {
        "Lacking requirements".to_string()
    } else {
        reason.to_string()
    };

    next.status = TicketStatus::Pending;
    next.remarks = Some(reason);
    next.hold_started_at = Some(now);

    Ok(next)
}

fn complete(
    ticket: &Ticket,
    window: i32,
    force: bool,
    now: DateTime<Utc>,
    policy: TimingPolicy,
) -> Result<Ticket, ServiceError> {
    if window != LAST_WINDOW && !force {
        return Err(ServiceError::InvalidTransition(
            ticket.id,
            "complete",
            ticket.status,
        ));
    }

    let mut next = leave_serving(ticket, window, "complete", now, policy)?;

    next.status = TicketStatus::Done;
    next.completed_at = Some(now);
    next.remarks = None;

    Ok(next)
}

fn requeue(
    ticket: &Ticket,
    window: i32,
    now: DateTime<Utc>,
    policy: TimingPolicy,
) -> Result<Ticket, ServiceError> {
    let mut next = leave_serving(ticket, window, "requeue", now, policy)?;

    next.status = TicketStatus::Waiting;
    next.set_wait_start(window, Some(now));
    next.remarks = None;

    Ok(next)
}

/// Shared exit path for every transition out of `serving`: freezes the
/// window's serving duration exactly once and clears the serving clock.
fn leave_serving(
    ticket: &Ticket,
    window: i32,
    action: &'static str,
    now: DateTime<Utc>,
    policy: TimingPolicy,
) -> Result<Ticket, ServiceError> {
    let since = match ticket.state() {
        TicketState::Serving { window: w, since } if w == window => since,
        _ => {
            return Err(ServiceError::InvalidTransition(
                ticket.id,
                action,
                ticket.status,
            ))
        }
    };

    let mut next = ticket.clone();
    let served = (now - since).num_seconds().max(0);
    record_serving(&mut next, window, served, policy);
    next.serving_started_at = None;

    Ok(next)
}

fn record_waiting(ticket: &mut Ticket, window: i32, seconds: i64, policy: TimingPolicy) {
    if let Some(previous) = ticket.waiting_seconds(window) {
        match policy {
            TimingPolicy::Overwrite => {
                tracing::warn!(
                    "ticket {} re-entered window {}: overwriting waiting time {}s with {}s",
                    ticket.ticket_number,
                    window,
                    previous,
                    seconds
                );
            }
            TimingPolicy::Reject => {
                tracing::warn!(
                    "ticket {} re-entered window {}: keeping first waiting time {}s",
                    ticket.ticket_number,
                    window,
                    previous
                );
                return;
            }
        }
    }
    ticket.set_waiting_seconds(window, seconds);
}

fn record_serving(ticket: &mut Ticket, window: i32, seconds: i64, policy: TimingPolicy) {
    if let Some(previous) = ticket.serving_seconds(window) {
        match policy {
            TimingPolicy::Overwrite => {
                tracing::warn!(
                    "ticket {} re-served at window {}: overwriting serving time {}s with {}s",
                    ticket.ticket_number,
                    window,
                    previous,
                    seconds
                );
            }
            TimingPolicy::Reject => {
                tracing::warn!(
                    "ticket {} re-served at window {}: keeping first serving time {}s",
                    ticket.ticket_number,
                    window,
                    previous
                );
                return;
            }
        }
    }
    ticket.set_serving_seconds(window, seconds);
}

/// Live queue ordering over a snapshot: priority lane first, then FIFO by
/// registration time. Nothing positional is persisted, so the ordering
/// self-corrects if priority flags change mid-wait.
pub fn order_waiting<'a>(tickets: &'a [Ticket], window: i32) -> Vec<&'a Ticket> {
    let mut queue: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Waiting && t.current_window == window)
        .collect();
    queue.sort_by(|a, b| {
        b.is_priority
            .cmp(&a.is_priority)
            .then(a.created_at.cmp(&b.created_at))
    });
    queue
}

/// Global hold pool over a snapshot, most recently held first.
pub fn order_pool<'a>(tickets: &'a [Ticket]) -> Vec<&'a Ticket> {
    let mut pool: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Pending)
        .collect();
    pool.sort_by(|a, b| b.hold_started_at.cmp(&a.hold_started_at));
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 13, 8, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn registered(number: &str, priority: bool, t: i64) -> Ticket {
        register_ticket(number.to_string(), None, priority, at(t))
    }

    #[test]
    fn register_defaults_to_anonymous() {
        let ticket = register_ticket("JAN13-01".into(), Some("   ".into()), false, at(0));
        assert_eq!(ticket.client_name, ANONYMOUS_CLIENT);
        assert_eq!(ticket.status, TicketStatus::Waiting);
        assert_eq!(ticket.current_window, 1);
        assert_eq!(ticket.w1_wait_start, Some(at(0)));
        assert_eq!(ticket.total_hold_seconds, 0);
    }

    #[test]
    fn register_trims_client_name() {
        let ticket = register_ticket("JAN13-02".into(), Some("  Juan Dela Cruz ".into()), true, at(0));
        assert_eq!(ticket.client_name, "Juan Dela Cruz");
        assert!(ticket.is_priority);
    }

    #[test]
    fn call_then_pass_round_trip() {
        let ticket = registered("JAN13-01", false, 0);

        let serving = transition(
            &ticket,
            &TicketAction::Call { window: 1 },
            at(10),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        assert_eq!(serving.status, TicketStatus::Serving);
        assert_eq!(serving.w1_waiting_seconds, Some(10));
        assert_eq!(serving.serving_started_at, Some(at(10)));
        assert_eq!(serving.called_at, Some(at(10)));

        let passed = transition(
            &serving,
            &TicketAction::Pass { window: 1 },
            at(30),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        assert_eq!(passed.status, TicketStatus::Waiting);
        assert_eq!(passed.current_window, 2);
        assert_eq!(passed.w1_waiting_seconds, Some(10));
        assert_eq!(passed.w1_serving_seconds, Some(20));
        assert_eq!(passed.w2_wait_start, Some(at(30)));
        assert_eq!(passed.remarks, None);
        assert_eq!(passed.serving_started_at, None);
    }

    #[test]
    fn hold_round_trip_accumulates_and_reroutes() {
        let ticket = registered("JAN13-01", false, 0);
        let ticket = transition(
            &ticket,
            &TicketAction::Call { window: 1 },
            at(5),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        let ticket = transition(
            &ticket,
            &TicketAction::Pass { window: 1 },
            at(20),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        let ticket = transition(
            &ticket,
            &TicketAction::Call { window: 2 },
            at(25),
            TimingPolicy::Overwrite,
        )
        .unwrap();

        let held = transition(
            &ticket,
            &TicketAction::Hold {
                window: 2,
                reason: "missing ID".into(),
            },
            at(40),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        assert_eq!(held.status, TicketStatus::Pending);
        assert_eq!(held.remarks.as_deref(), Some("missing ID"));
        assert_eq!(held.hold_started_at, Some(at(40)));
        assert_eq!(held.w2_serving_seconds, Some(15));

        // Reactivated at a window other than the one that paused it.
        let resumed = transition(
            &held,
            &TicketAction::Call { window: 1 },
            at(100),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        assert_eq!(resumed.status, TicketStatus::Serving);
        assert_eq!(resumed.current_window, 1);
        assert_eq!(resumed.total_hold_seconds, 60);
        assert_eq!(resumed.hold_started_at, None);
        assert_eq!(resumed.remarks, None);
    }

    #[test]
    fn hold_time_sums_across_episodes() {
        let ticket = registered("JAN13-01", false, 0);
        let ticket = transition(&ticket, &TicketAction::Call { window: 1 }, at(5), TimingPolicy::Overwrite).unwrap();

        let ticket = transition(
            &ticket,
            &TicketAction::Hold { window: 1, reason: "no form".into() },
            at(10),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        let ticket = transition(&ticket, &TicketAction::Call { window: 1 }, at(40), TimingPolicy::Overwrite).unwrap();
        assert_eq!(ticket.total_hold_seconds, 30);

        let ticket = transition(
            &ticket,
            &TicketAction::Hold { window: 1, reason: "no receipt".into() },
            at(50),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        let ticket = transition(&ticket, &TicketAction::Call { window: 2 }, at(95), TimingPolicy::Overwrite).unwrap();
        assert_eq!(ticket.total_hold_seconds, 75);
    }

    #[test]
    fn empty_hold_reason_gets_a_default() {
        let ticket = registered("JAN13-01", false, 0);
        let ticket = transition(&ticket, &TicketAction::Call { window: 1 }, at(1), TimingPolicy::Overwrite).unwrap();
        let held = transition(
            &ticket,
            &TicketAction::Hold { window: 1, reason: "  ".into() },
            at(2),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        assert_eq!(held.remarks.as_deref(), Some("Lacking requirements"));
    }

    #[test]
    fn complete_requires_last_window_or_force() {
        let ticket = registered("JAN13-01", false, 0);
        let serving = transition(&ticket, &TicketAction::Call { window: 1 }, at(5), TimingPolicy::Overwrite).unwrap();

        let premature = transition(
            &serving,
            &TicketAction::Complete { window: 1, force: false },
            at(10),
            TimingPolicy::Overwrite,
        );
        assert!(matches!(
            premature,
            Err(ServiceError::InvalidTransition(_, "complete", _))
        ));

        let forced = transition(
            &serving,
            &TicketAction::Complete { window: 1, force: true },
            at(10),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        assert_eq!(forced.status, TicketStatus::Done);
        assert_eq!(forced.completed_at, Some(at(10)));
        assert_eq!(forced.w1_serving_seconds, Some(5));
    }

    #[test]
    fn complete_at_releasing_window() {
        let mut ticket = registered("JAN13-01", false, 0);
        for window in 1..=2 {
            ticket = transition(&ticket, &TicketAction::Call { window }, at(window as i64 * 10), TimingPolicy::Overwrite).unwrap();
            ticket = transition(&ticket, &TicketAction::Pass { window }, at(window as i64 * 10 + 5), TimingPolicy::Overwrite).unwrap();
        }
        ticket = transition(&ticket, &TicketAction::Call { window: 3 }, at(40), TimingPolicy::Overwrite).unwrap();
        let done = transition(
            &ticket,
            &TicketAction::Complete { window: 3, force: false },
            at(55),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        assert_eq!(done.status, TicketStatus::Done);
        assert_eq!(done.w3_serving_seconds, Some(15));
        assert!(done.w1_waiting_seconds.is_some());
        assert!(done.w2_serving_seconds.is_some());
    }

    #[test]
    fn pass_from_last_window_is_rejected() {
        let mut ticket = registered("JAN13-01", false, 0);
        ticket.status = TicketStatus::Serving;
        ticket.current_window = 3;
        ticket.serving_started_at = Some(at(0));

        let result = transition(&ticket, &TicketAction::Pass { window: 3 }, at(5), TimingPolicy::Overwrite);
        assert!(matches!(result, Err(ServiceError::InvalidTransition(_, "pass", _))));
    }

    #[test]
    fn duplicate_call_is_rejected() {
        let ticket = registered("JAN13-01", false, 0);
        let serving = transition(&ticket, &TicketAction::Call { window: 1 }, at(10), TimingPolicy::Overwrite).unwrap();

        // A second delivery of the same click must not capture a second
        // waiting duration.
        let again = transition(&serving, &TicketAction::Call { window: 1 }, at(12), TimingPolicy::Overwrite);
        assert!(matches!(again, Err(ServiceError::InvalidTransition(_, "call", _))));
    }

    #[test]
    fn call_from_wrong_window_is_rejected() {
        let ticket = registered("JAN13-01", false, 0);
        let result = transition(&ticket, &TicketAction::Call { window: 2 }, at(5), TimingPolicy::Overwrite);
        assert!(matches!(result, Err(ServiceError::InvalidTransition(_, "call", _))));
    }

    #[test]
    fn pass_on_pending_is_rejected() {
        let ticket = registered("JAN13-01", false, 0);
        let ticket = transition(&ticket, &TicketAction::Call { window: 1 }, at(5), TimingPolicy::Overwrite).unwrap();
        let held = transition(
            &ticket,
            &TicketAction::Hold { window: 1, reason: "x".into() },
            at(6),
            TimingPolicy::Overwrite,
        )
        .unwrap();
        let result = transition(&held, &TicketAction::Pass { window: 1 }, at(7), TimingPolicy::Overwrite);
        assert!(matches!(result, Err(ServiceError::InvalidTransition(_, "pass", _))));
    }

    #[test]
    fn out_of_range_window_is_rejected() {
        let ticket = registered("JAN13-01", false, 0);
        let result = transition(&ticket, &TicketAction::Call { window: 4 }, at(5), TimingPolicy::Overwrite);
        assert!(matches!(result, Err(ServiceError::InvalidWindow(4))));
    }

    #[test]
    fn requeue_restarts_the_wait_clock() {
        let ticket = registered("JAN13-01", false, 0);
        let serving = transition(&ticket, &TicketAction::Call { window: 1 }, at(10), TimingPolicy::Overwrite).unwrap();
        let back = transition(&serving, &TicketAction::Requeue { window: 1 }, at(25), TimingPolicy::Overwrite).unwrap();

        assert_eq!(back.status, TicketStatus::Waiting);
        assert_eq!(back.current_window, 1);
        assert_eq!(back.w1_serving_seconds, Some(15));
        assert_eq!(back.w1_wait_start, Some(at(25)));
        assert_eq!(back.serving_started_at, None);
    }

    #[test]
    fn overwrite_policy_replaces_reentry_timings() {
        let ticket = registered("JAN13-01", false, 0);
        let serving = transition(&ticket, &TicketAction::Call { window: 1 }, at(10), TimingPolicy::Overwrite).unwrap();
        let back = transition(&serving, &TicketAction::Requeue { window: 1 }, at(20), TimingPolicy::Overwrite).unwrap();
        let again = transition(&back, &TicketAction::Call { window: 1 }, at(50), TimingPolicy::Overwrite).unwrap();

        // Second visit: 50 - 20 = 30, replacing the original 10.
        assert_eq!(again.w1_waiting_seconds, Some(30));
    }

    #[test]
    fn reject_policy_keeps_first_timings() {
        let ticket = registered("JAN13-01", false, 0);
        let serving = transition(&ticket, &TicketAction::Call { window: 1 }, at(10), TimingPolicy::Reject).unwrap();
        let back = transition(&serving, &TicketAction::Requeue { window: 1 }, at(20), TimingPolicy::Reject).unwrap();
        let again = transition(&back, &TicketAction::Call { window: 1 }, at(50), TimingPolicy::Reject).unwrap();
        assert_eq!(again.w1_waiting_seconds, Some(10));

        let back2 = transition(&again, &TicketAction::Requeue { window: 1 }, at(70), TimingPolicy::Reject).unwrap();
        assert_eq!(back2.w1_serving_seconds, Some(10));
    }

    #[test]
    fn waiting_order_puts_priority_lane_first() {
        let a = registered("JAN13-02", true, 10);
        let b = registered("JAN13-01", false, 5);
        let c = registered("JAN13-03", true, 20);
        let tickets = vec![a.clone(), b.clone(), c.clone()];

        let queue = order_waiting(&tickets, 1);
        let numbers: Vec<&str> = queue.iter().map(|t| t.ticket_number.as_str()).collect();
        assert_eq!(numbers, vec!["JAN13-02", "JAN13-03", "JAN13-01"]);
    }

    #[test]
    fn waiting_order_ignores_other_windows_and_statuses() {
        let a = registered("JAN13-01", false, 0);
        let mut b = registered("JAN13-02", false, 1);
        b.current_window = 2;
        let mut c = registered("JAN13-03", true, 2);
        c.status = TicketStatus::Done;
        let tickets = vec![a, b, c];

        let queue = order_waiting(&tickets, 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].ticket_number, "JAN13-01");
    }

    #[test]
    fn pool_orders_most_recently_held_first() {
        let mut a = registered("JAN13-01", false, 0);
        a.status = TicketStatus::Pending;
        a.remarks = Some("x".into());
        a.hold_started_at = Some(at(10));
        let mut b = registered("JAN13-02", false, 1);
        b.status = TicketStatus::Pending;
        b.remarks = Some("y".into());
        b.hold_started_at = Some(at(30));
        let tickets = vec![a, b];

        let pool = order_pool(&tickets);
        let numbers: Vec<&str> = pool.iter().map(|t| t.ticket_number.as_str()).collect();
        assert_eq!(numbers, vec!["JAN13-02", "JAN13-01"]);
    }

    #[test]
    fn priority_citizen_is_called_before_earlier_registrations() {
        let first = registered("JAN13-01", false, 0);
        let second = registered("JAN13-02", false, 5);
        let senior = registered("JAN13-03", true, 9);
        let tickets = vec![first, second, senior];

        let queue = order_waiting(&tickets, 1);
        assert_eq!(queue[0].ticket_number, "JAN13-03");
        assert_eq!(queue[1].ticket_number, "JAN13-01");
        assert_eq!(queue[2].ticket_number, "JAN13-02");
    }
}
