//! One monitoring session: from the start banner to the completion footer.
//!
//! Every log write goes through [`Session`], which also mirrors the text to
//! an output stream (stdout in production). `finish` consumes the session,
//! so the footer can be written at most once.
//!
//! The log file is the record; a failing mirror (closed pipe) is logged and
//! then skipped, never fatal.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};

use crate::cli::LogMode;
use crate::error::AppError;
use crate::output::{banner, footer, sample_line, title};
use crate::sample::Sample;

/// Append-only handle to the log file. The file is reopened for every write
/// so it is recreated if it disappears mid-session.
#[derive(Debug)]
struct LogFile {
    path: PathBuf,
}

impl LogFile {
    /// Create or reset the file according to `mode`, writing the title line
    /// whenever the file starts out empty.
    fn prepare(path: &Path, mode: LogMode, device: &str) -> Result<Self, AppError> {
        let handle = LogFile {
            path: path.to_path_buf(),
        };
        let mut file = match mode {
            LogMode::Truncate => File::create(path),
            LogMode::Append => OpenOptions::new().create(true).append(true).open(path),
        }
        .map_err(|source| handle.error(source))?;

        let len = file
            .metadata()
            .map_err(|source| handle.error(source))?
            .len();
        if len == 0 {
            file.write_all(title(device).as_bytes())
                .map_err(|source| handle.error(source))?;
        } else {
            log::debug!("appending to existing log {} ({len} bytes)", path.display());
        }
        Ok(handle)
    }

    fn append(&self, text: &str) -> Result<(), AppError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.error(source))?;
        file.write_all(text.as_bytes())
            .map_err(|source| self.error(source))
    }

    fn error(&self, source: std::io::Error) -> AppError {
        AppError::LogFile {
            path: self.path.clone(),
            source,
        }
    }
}

pub(crate) struct Session<W: Write> {
    log: LogFile,
    out: W,
    mirror_failed: bool,
    started: DateTime<FixedOffset>,
    samples: u64,
}

impl<W: Write> Session<W> {
    /// Prepare the log file and append the "TEST STARTED" banner.
    pub(crate) fn open(
        path: &Path,
        mode: LogMode,
        device: &str,
        started: DateTime<FixedOffset>,
        out: W,
    ) -> Result<Self, AppError> {
        let log = LogFile::prepare(path, mode, device)?;
        log.append(&banner(&started))?;
        log::info!("session started, logging to {} ({mode:?})", path.display());

        Ok(Session {
            log,
            out,
            mirror_failed: false,
            started,
            samples: 0,
        })
    }

    pub(crate) fn record(&mut self, sample: &Sample) -> Result<(), AppError> {
        let line = sample_line(sample);
        self.log.append(&format!("{line}\n"))?;
        self.mirror(&format!("{}\n", line.trim()));
        self.samples += 1;
        Ok(())
    }

    pub(crate) fn samples(&self) -> u64 {
        self.samples
    }

    /// Console-only message; never reaches the log file.
    pub(crate) fn announce(&mut self, message: &str) {
        self.mirror(&format!("{message}\n"));
    }

    /// Append the footer, mirror it, and hand back the output stream.
    pub(crate) fn finish(mut self, ended: DateTime<FixedOffset>) -> Result<W, AppError> {
        let text = footer(&self.started, &ended);
        self.log.append(&text)?;
        self.mirror(&text);
        log::info!("session finished after {} samples", self.samples);
        Ok(self.out)
    }

    fn mirror(&mut self, text: &str) {
        if self.mirror_failed {
            return;
        }
        if let Err(e) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            log::warn!("console output disabled, log file still written: {e}");
            self.mirror_failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{GpuLoad, PowerStatus};
    use chrono::TimeDelta;
    use std::fs;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn sample(taken_at: &str, uptime_secs: i64) -> Sample {
        Sample {
            taken_at: at(taken_at),
            uptime: Ok(TimeDelta::seconds(uptime_secs)),
            power: Ok(PowerStatus::Unknown),
            gpu: Ok(Some(GpuLoad::from_tenths(455))),
        }
    }

    fn sep() -> String {
        "=".repeat(50)
    }

    #[test]
    fn truncate_writes_title_and_banner_over_old_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("power_log.txt");
        fs::write(&path, "previous run\n").unwrap();

        let session = Session::open(
            &path,
            LogMode::Truncate,
            "Jetson Xavier",
            at("2026-03-01T08:00:00+00:00"),
            Vec::<u8>::new(),
        )
        .unwrap();
        assert_eq!(session.samples(), 0);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            format!(
                "Power Monitor Log - Jetson Xavier\n{sep}\nTEST STARTED\nStart Time: 2026-03-01 08:00:00\n{sep}\n",
                sep = sep()
            )
        );
    }

    #[test]
    fn append_keeps_old_content_and_adds_banner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("power_log.txt");
        fs::write(&path, "previous run\n").unwrap();

        Session::open(
            &path,
            LogMode::Append,
            "Jetson Xavier",
            at("2026-03-01T08:00:00+00:00"),
            Vec::<u8>::new(),
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("previous run\n"));
        assert!(!content.contains("Power Monitor Log"));
        assert!(content.ends_with(&format!(
            "{sep}\nTEST STARTED\nStart Time: 2026-03-01 08:00:00\n{sep}\n",
            sep = sep()
        )));
    }

    #[test]
    fn append_to_missing_file_writes_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("power_log.txt");

        Session::open(
            &path,
            LogMode::Append,
            "Orin",
            at("2026-03-01T08:00:00+00:00"),
            Vec::<u8>::new(),
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Power Monitor Log - Orin\n"));
        assert_eq!(content.matches("TEST STARTED").count(), 1);
    }

    #[test]
    fn records_and_footer_are_mirrored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("power_log.txt");

        let mut session = Session::open(
            &path,
            LogMode::Truncate,
            "Jetson Xavier",
            at("2026-03-01T08:00:00+00:00"),
            Vec::<u8>::new(),
        )
        .unwrap();
        for (i, ts) in ["2026-03-01T08:00:00+00:00", "2026-03-01T08:30:00+00:00", "2026-03-01T09:00:00+00:00"]
            .iter()
            .enumerate()
        {
            session.record(&sample(ts, 100 + i as i64 * 1800)).unwrap();
        }
        assert_eq!(session.samples(), 3);
        let out = session.finish(at("2026-03-01T09:10:00+00:00")).unwrap();
        let out = String::from_utf8(out).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        let banner_end = lines.iter().position(|l| l.starts_with("Start Time:")).unwrap() + 1;
        let footer_start = lines.iter().position(|l| *l == "TEST COMPLETED").unwrap() - 2;
        let body = &lines[banner_end + 1..footer_start];
        assert_eq!(body.len(), 3);
        assert_eq!(
            body[0],
            "2026-03-01 08:00:00 | Uptime: 0:01:40 | Power: Unknown | GPU Power: Load: 45.5%"
        );
        assert!(body.iter().all(|l| l.contains(" | Uptime: ") && l.contains(" | GPU Power: ")));

        assert_eq!(content.matches("TEST COMPLETED").count(), 1);
        assert!(content.contains("End Time: 2026-03-01 09:10:00\nTotal Duration: 1:10:00\n"));

        // stdout carries the sample lines and the footer block verbatim
        assert!(out.starts_with(
            "2026-03-01 08:00:00 | Uptime: 0:01:40 | Power: Unknown | GPU Power: Load: 45.5%\n"
        ));
        assert!(out.ends_with(&footer(
            &at("2026-03-01T08:00:00+00:00"),
            &at("2026-03-01T09:10:00+00:00")
        )));
    }

    /// Output stream whose reader has gone away
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn closed_stdout_still_logs_samples_and_footer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("power_log.txt");

        let mut session = Session::open(
            &path,
            LogMode::Truncate,
            "Jetson Xavier",
            at("2026-03-01T08:00:00+00:00"),
            ClosedPipe,
        )
        .unwrap();
        session.record(&sample("2026-03-01T08:00:00+00:00", 60)).unwrap();
        session.record(&sample("2026-03-01T08:30:00+00:00", 1860)).unwrap();
        session.announce("\nStopping power monitoring...");
        assert_eq!(session.samples(), 2);
        session.finish(at("2026-03-01T08:45:00+00:00")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().filter(|l| l.contains(" | Uptime: ")).count(), 2);
        assert_eq!(content.matches("TEST COMPLETED").count(), 1);
        assert!(content.contains("Total Duration: 0:45:00\n"));
        assert!(!content.contains("Stopping power monitoring"));
    }

    #[test]
    fn unwritable_log_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("power_log.txt");

        let err = Session::open(
            &path,
            LogMode::Truncate,
            "Jetson Xavier",
            at("2026-03-01T08:00:00+00:00"),
            Vec::<u8>::new(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, AppError::LogFile { path: ref p, .. } if *p == path));
    }
}
