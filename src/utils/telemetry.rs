use std::env;
use std::str::FromStr;
use tracing::Level;

pub const LOG_LEVEL_VAR: &str = "LIBRARY_LOG_LEVEL";

pub fn log_level() -> Level {
    env::var(LOG_LEVEL_VAR).ok()
        .and_then(|level| Level::from_str(level.trim()).ok())
        .unwrap_or(Level::INFO)
}

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(log_level())
        // disable printing the name of the module in every log line.
        .with_target(false)
        // this needs to be set to false, otherwise ANSI color codes will
        // show up in a confusing manner in CloudWatch logs.
        .with_ansi(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .json()
        .init();
}

#[cfg(test)]
mod tests {
    use std::env;
    use tracing::Level;
    use crate::utils::telemetry::{log_level, LOG_LEVEL_VAR};

    #[tokio::test]
    async fn test_should_parse_log_level() {
        env::set_var(LOG_LEVEL_VAR, "debug");
        assert_eq!(Level::DEBUG, log_level());
        env::set_var(LOG_LEVEL_VAR, "chatty");
        assert_eq!(Level::INFO, log_level());
        env::remove_var(LOG_LEVEL_VAR);
        assert_eq!(Level::INFO, log_level());
    }
}
