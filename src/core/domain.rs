use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use tracing::warn;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> i64;
}

// Configuration abstracts config options for the circulation engine
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub max_stock_attempts: u32,
    pub retry_backoff_ms: u64,
    pub overdue_days: i64,
    pub top_borrowed_limit: usize,
    pub default_stock: i64,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_stock_attempts: 5,
            retry_backoff_ms: 10,
            overdue_days: 14,
            top_borrowed_limit: 5,
            default_stock: 1,
        }
    }

    // Overrides defaults from LIBRARY_* environment variables.
    pub fn from_env(branch_id: &str) -> Self {
        let mut config = Configuration::new(branch_id);
        if let Ok(branch) = env::var("LIBRARY_BRANCH_ID") {
            if !branch.trim().is_empty() {
                config.branch_id = branch.trim().to_string();
            }
        }
        config.max_stock_attempts = env_or("LIBRARY_MAX_STOCK_ATTEMPTS", config.max_stock_attempts).max(1);
        config.retry_backoff_ms = env_or("LIBRARY_RETRY_BACKOFF_MS", config.retry_backoff_ms);
        config.overdue_days = env_or("LIBRARY_OVERDUE_DAYS", config.overdue_days);
        config.top_borrowed_limit = env_or("LIBRARY_TOP_BORROWED_LIMIT", config.top_borrowed_limit);
        config.default_stock = env_or("LIBRARY_DEFAULT_STOCK", config.default_stock).max(0);
        config
    }

    // metadata attached to every domain event
    pub fn event_metadata(&self) -> HashMap<String, String> {
        HashMap::from([("branch_id".to_string(), self.branch_id.to_string())])
    }
}

fn env_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(val) => val,
            Err(_) => {
                warn!(variable = name, value = raw.as_str(), "ignoring unparsable configuration value");
                default
            }
        },
        Err(_) => default,
    }
}
