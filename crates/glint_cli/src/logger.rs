use std::sync::atomic::{AtomicU32, Ordering};

use log::LevelFilter;

/// Initialize the logger; `RUST_LOG` overrides `level` when set.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Logs render progress at `info` in 10% steps.
///
/// Safe to call from rayon workers; each step is logged once.
pub struct ProgressLog {
    last_step: AtomicU32,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self {
            last_step: AtomicU32::new(0),
        }
    }

    /// Record `done` of `total` units, returning the percentage if a new step was reached.
    pub fn report(&self, done: u32, total: u32) -> Option<u32> {
        if total == 0 {
            return None;
        }
        let step = (done as u64 * 10 / total as u64).min(10) as u32;
        let previous = self.last_step.fetch_max(step, Ordering::Relaxed);
        if step > previous {
            let percent = step * 10;
            log::info!("{}% ({}/{})", percent, done, total);
            Some(percent)
        } else {
            None
        }
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new()
    }
}
