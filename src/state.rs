use crate::config::Config;
use crate::engine::Calculator;
use crate::security::StaticPolicy;
use std::sync::Arc;
use std::time::Instant;

/// Read-only state shared by every worker. Nothing here changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub calculator: Arc<Calculator>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(calculator: Calculator) -> Self {
        Self {
            calculator: Arc::new(calculator),
            start_time: Instant::now(),
        }
    }

    /// State wired with the configured static permission policy.
    pub fn from_config(config: &Config) -> Self {
        let policy = StaticPolicy::new(config.multiply_permission);
        Self::new(Calculator::new(Arc::new(policy)))
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
