use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    response::sse::{Event, KeepAlive, Sse},
    Extension,
};
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::AppState;

/// Server-sent change feed. Payloads are thin on purpose: stations
/// re-query their view after each event instead of trusting the payload,
/// so at-least-once and out-of-order delivery are both harmless. A
/// lagged subscriber just skips to the next event.
pub async fn subscribe_events(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = app_state.notifier.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|change| {
        let change = change.ok()?;
        let event = Event::default()
            .event(change.topic)
            .json_data(&change)
            .ok()?;
        Some(Ok(event))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("keep-alive"),
    )
}
