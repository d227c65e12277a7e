use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::consts::{NOT_AVAILABLE, TIMESTAMP_FORMAT, UNKNOWN};
use crate::sample::{GpuLoad, PowerStatus, Reading, SupplyReading};

const SECS_PER_DAY: i64 = 86_400;

pub(crate) fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Render a duration as `H:MM:SS`, prefixed with `N day(s), ` past one day
/// and suffixed with `.ffffff` when there are leftover microseconds.
///
/// Negative durations (wall clock stepped backwards) render as zero.
pub(crate) fn format_timedelta(delta: TimeDelta) -> String {
    let delta = delta.max(TimeDelta::zero());
    let total_secs = delta.num_seconds();
    let micros = delta.subsec_nanos() / 1_000;

    let days = total_secs / SECS_PER_DAY;
    let rem = total_secs % SECS_PER_DAY;
    let (hours, minutes, seconds) = (rem / 3600, (rem % 3600) / 60, rem % 60);

    let mut out = String::new();
    if days > 0 {
        let plural = if days == 1 { "" } else { "s" };
        out.push_str(&format!("{days} day{plural}, "));
    }
    out.push_str(&format!("{hours}:{minutes:02}:{seconds:02}"));
    if micros != 0 {
        out.push_str(&format!(".{micros:06}"));
    }
    out
}

/// Human form of the sampling interval for the startup message
pub(crate) fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        let minutes = secs / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else if secs == 1 {
        "1 second".to_string()
    } else {
        format!("{secs} seconds")
    }
}

pub(crate) fn format_uptime(uptime: &Reading<TimeDelta>) -> String {
    match uptime {
        Ok(delta) => format_timedelta(*delta),
        Err(e) => format!("Error: {e}"),
    }
}

/// Each entry contributes `NAME: STATUS ` and/or `(Voltage: X.XXV) `; the
/// trailing space is part of the log format.
pub(crate) fn format_power(power: &Reading<PowerStatus>) -> String {
    match power {
        Ok(PowerStatus::Unknown) => UNKNOWN.to_string(),
        Ok(PowerStatus::Sources(readings)) => readings.iter().map(format_supply).collect(),
        Err(e) => format!("Error reading power status: {e}"),
    }
}

fn format_supply(reading: &SupplyReading) -> String {
    let mut out = String::new();
    if let Some(status) = &reading.status {
        out.push_str(&format!("{}: {status} ", reading.name));
    }
    if let Some(volts) = reading.voltage_volts() {
        out.push_str(&format!("(Voltage: {volts:.2}V) "));
    }
    out
}

pub(crate) fn format_gpu(gpu: &Reading<Option<GpuLoad>>) -> String {
    match gpu {
        Ok(Some(load)) => format!("Load: {:.1}%", load.percent()),
        Ok(None) => NOT_AVAILABLE.to_string(),
        Err(e) => format!("Error: {e}"),
    }
}
