//! Graceful shutdown on SIGINT/SIGTERM
//!
//! The signal handler only flips a flag; the monitor loop polls it between
//! samples and while sleeping, so log writes never race with the footer.
//! Every other signal keeps its default action, so e.g. SIGHUP ends the
//! process without a footer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use signal_hook::consts::{SIGINT, SIGTERM};

use crate::error::AppError;

/// Upper bound on how long a pending signal goes unnoticed during a wait
const POLL_SLICE: Duration = Duration::from_millis(250);

const GRACEFUL_SIGNALS: [i32; 2] = [SIGINT, SIGTERM];

#[derive(Debug, Clone, Default)]
pub(crate) struct Shutdown {
    requested: Arc<AtomicBool>,
}

impl Shutdown {
    /// Point SIGINT and SIGTERM at a fresh flag.
    pub(crate) fn install() -> Result<Self, AppError> {
        let shutdown = Shutdown::default();
        for signal in GRACEFUL_SIGNALS {
            signal_hook::flag::register(signal, Arc::clone(&shutdown.requested))
                .map_err(|source| AppError::SignalHandler { signal, source })?;
        }
        log::debug!("graceful shutdown on signals {GRACEFUL_SIGNALS:?}");
        Ok(shutdown)
    }

    #[cfg(test)]
    pub(crate) fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Sleep for `duration` unless shutdown is requested first.
    /// Returns true when the wait was cut short.
    pub(crate) fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        while !self.is_requested() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep(POLL_SLICE.min(deadline - now));
        }
        true
    }
}
