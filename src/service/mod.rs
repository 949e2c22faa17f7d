pub mod error;
pub mod lifecycle;
pub mod notifier;
pub mod queue_service;
pub mod sequencer;
