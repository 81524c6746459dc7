//! Run metrics and logging setup.
//!
//! Provides structured logging and counters for monitoring long runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters for one engine.
pub struct Metrics {
    generation_count: AtomicU64,
    match_count: AtomicU64,
    mutation_count: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation_count: AtomicU64::new(0),
            match_count: AtomicU64::new(0),
            mutation_count: AtomicU64::new(0),
        }
    }

    /// Records a completed generation with its duration.
    pub fn record_generation(&self, duration: Duration, population: usize, distinct: usize) {
        self.generation_count.fetch_add(1, Ordering::Relaxed);

        // Log at info level every 1000 generations
        let generation = self.generation_count.load(Ordering::Relaxed);
        if generation % 1000 == 0 {
            tracing::info!(
                generation = generation,
                population = population,
                strategies = distinct,
                duration_us = duration.as_micros() as u64,
                "Moran generation"
            );
        }
    }

    pub fn record_matches(&self, count: usize) {
        self.match_count.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_mutation(&self) {
        self.mutation_count.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn generation_count(&self) -> u64 {
        self.generation_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn match_count(&self) -> u64 {
        self.match_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn mutation_count(&self) -> u64 {
        self.mutation_count.load(Ordering::Relaxed)
    }

    /// Zeroes every counter.
    pub fn reset(&self) {
        self.generation_count.store(0, Ordering::Relaxed);
        self.match_count.store(0, Ordering::Relaxed);
        self.mutation_count.store(0, Ordering::Relaxed);
    }
}

/// Initialize tracing subscriber for logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}

/// Like [`init_logging`], but honours `RUST_LOG` and falls back to `default_filter`.
pub fn init_logging_with_filter(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}
