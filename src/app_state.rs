// =============================================================================
// Central Application State — Meridian Stock Desk
// =============================================================================
//
// The pricing and indicator engines are pure functions and hold no state of
// their own; the only shared mutable state in the process is the runtime
// configuration plus a version counter the dashboard polls to detect changes.
//
// Thread safety:
//   - Atomic counter for lock-free version tracking.
//   - parking_lot::RwLock around the runtime configuration.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::runtime_config::RuntimeConfig;

/// Shared application state, wrapped in `Arc` and handed to every request
/// handler.
pub struct AppState {
    /// Monotonically increasing version counter. Incremented on every
    /// meaningful state mutation so clients can detect settings changes.
    pub state_version: AtomicU64,

    /// Runtime configuration (watchlist, pricing defaults).
    pub runtime_config: Arc<RwLock<RuntimeConfig>>,

    /// Instant when the desk was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Construct a new `AppState` from the given runtime configuration.
    /// The returned value is typically wrapped in `Arc` immediately.
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            state_version: AtomicU64::new(1),
            runtime_config: Arc::new(RwLock::new(config)),
            start_time: std::time::Instant::now(),
        }
    }

    /// Bump the state version after a mutation.
    pub fn increment_version(&self) {
        self.state_version.fetch_add(1, Ordering::SeqCst);
    }

    /// Current state version.
    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::SeqCst)
    }

    /// Seconds since the desk started.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
