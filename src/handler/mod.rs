pub mod admin;
pub mod events;
pub mod kiosk;
pub mod monitor;
pub mod queue;
