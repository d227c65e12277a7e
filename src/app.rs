use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::LogMode;
use crate::error::AppError;
use crate::output::format_interval;
use crate::sample::{Sampler, SysPaths};
use crate::session::Session;
use crate::shutdown::Shutdown;
use crate::utils::Timezone;

/// Fully resolved run configuration (CLI over config file over defaults)
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) log_file: PathBuf,
    pub(crate) mode: LogMode,
    pub(crate) interval: Duration,
    pub(crate) count: Option<u64>,
    pub(crate) device: String,
    pub(crate) paths: SysPaths,
    pub(crate) timezone: Timezone,
}

/// Sample until shutdown is requested (or `count` samples are taken), then
/// write the footer. Console output goes to `out`, which is returned.
pub(crate) fn run<W: Write>(
    settings: &Settings,
    shutdown: &Shutdown,
    mut out: W,
) -> Result<W, AppError> {
    if let Err(e) = writeln!(
        out,
        "Starting power monitor. Logging to {} every {}...",
        settings.log_file.display(),
        format_interval(settings.interval)
    ) {
        log::warn!("failed to write startup message: {e}");
    }

    let sampler = Sampler::new(settings.paths.clone());
    let mut session = Session::open(
        &settings.log_file,
        settings.mode,
        &settings.device,
        settings.timezone.now(),
        out,
    )?;

    while !shutdown.is_requested() {
        session.record(&sampler.collect(settings.timezone.now()))?;

        if settings.count.is_some_and(|limit| session.samples() >= limit) {
            log::debug!("sample limit reached");
            break;
        }
        log::debug!("sleeping {}s until next sample", settings.interval.as_secs());
        if shutdown.wait(settings.interval) {
            break;
        }
    }

    if shutdown.is_requested() {
        session.announce("\nStopping power monitoring...");
    }
    session.finish(settings.timezone.now())
}
