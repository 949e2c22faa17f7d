use crate::service::lifecycle::TimingPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub timing_policy: TimingPolicy,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);

        // Re-entry handling for already-recorded stage durations.
        let timing_policy = match std::env::var("QUEUE_TIMING_POLICY").as_deref() {
            Ok("reject") => TimingPolicy::Reject,
            _ => TimingPolicy::Overwrite,
        };

        Config {
            database_url,
            port,
            timing_policy,
        }
    }
}
