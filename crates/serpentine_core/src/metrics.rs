//! Tick counters and logging setup.
//!
//! The world records one sample per tick and bumps named counters for
//! gameplay events; a summary line is logged every `LOG_EVERY` ticks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Ten seconds of play at 60 fps.
const LOG_EVERY: u64 = 600;

pub const COUNTER_FOOD_EATEN: &str = "food_eaten";
pub const COUNTER_DEATHS: &str = "deaths";
pub const COUNTER_KILLS: &str = "kills";
pub const COUNTER_SEVERS: &str = "severs";
pub const COUNTER_HALVINGS: &str = "halvings";
pub const COUNTER_RESPAWNS: &str = "respawns";

pub struct Metrics {
    tick_count: AtomicU64,
    snake_count: AtomicU64,
    food_count: AtomicU64,
    counters: Mutex<HashMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            snake_count: AtomicU64::new(0),
            food_count: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its wall-clock duration.
    pub fn record_tick(&self, duration: Duration, snakes: usize, food: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.snake_count.store(snakes as u64, Ordering::Relaxed);
        self.food_count.store(food as u64, Ordering::Relaxed);

        if tick % LOG_EVERY == 0 {
            tracing::info!(
                tick,
                snakes,
                food,
                deaths = self.counter(COUNTER_DEATHS),
                severs = self.counter(COUNTER_SEVERS),
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn add_to_counter(&self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += amount;
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn snake_count(&self) -> u64 {
        self.snake_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_count(&self) -> u64 {
        self.food_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default
/// `info` filter. Calling it twice is harmless.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.tick_count(), 0);
        assert_eq!(metrics.counter(COUNTER_DEATHS), 0);
    }

    #[test]
    fn test_record_tick() {
        let metrics = Metrics::new();
        metrics.record_tick(Duration::from_millis(16), 26, 400);
        assert_eq!(metrics.tick_count(), 1);
        assert_eq!(metrics.snake_count(), 26);
        assert_eq!(metrics.food_count(), 400);
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = Metrics::new();
        metrics.increment_counter(COUNTER_SEVERS);
        metrics.add_to_counter(COUNTER_SEVERS, 4);
        metrics.add_to_counter(COUNTER_DEATHS, 0);
        assert_eq!(metrics.counter(COUNTER_SEVERS), 5);
        assert_eq!(metrics.counter(COUNTER_DEATHS), 0);
    }
}
