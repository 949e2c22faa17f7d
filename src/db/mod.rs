pub mod db;
pub mod settingsdb;
pub mod staffdb;
pub mod ticketdb;
