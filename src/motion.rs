//! Accelerometer feed: newline-delimited JSON samples (`{"x":0.1,"y":-0.2,"z":5.3}`)
//! read from a file or FIFO, typically written by a phone bridge.
//!
//! A missing or unreadable feed leaves the game without tilt input. Manual
//! keys still work, so failures here are logged and never surfaced as errors.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread;

use serde::Deserialize;

use crate::tilt::MotionSample;
use crate::timer::Clock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorStatus {
    Unavailable(String),
    Listening(PathBuf),
}

impl SensorStatus {
    pub fn label(&self) -> String {
        match self {
            SensorStatus::Unavailable(reason) => format!("tilt off: {reason}"),
            SensorStatus::Listening(path) => format!("tilt feed: {}", path.display()),
        }
    }
}

/// Missing axes read as zero.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSample {
    x: f64,
    y: f64,
    z: f64,
}

pub fn parse_sample(line: &str, clock: &Clock) -> Result<MotionSample, serde_json::Error> {
    let raw: RawSample = serde_json::from_str(line)?;
    Ok(MotionSample::new(raw.x, raw.y, raw.z, clock.now()))
}

/// Forwards every parsable line of `reader` to `emit` until the reader ends or
/// `emit` returns false. Returns the number of samples forwarded.
pub fn read_samples<R, F>(reader: R, clock: &Clock, mut emit: F) -> usize
where
    R: BufRead,
    F: FnMut(MotionSample) -> bool,
{
    let mut forwarded = 0;

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("motion feed read failed: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_sample(line, clock) {
            Ok(sample) => {
                if !emit(sample) {
                    break;
                }
                forwarded += 1;
            }
            Err(e) => log::warn!("skipping malformed motion sample {line:?}: {e}"),
        }
    }

    forwarded
}

/// Starts a reader thread for the feed at `path`.
pub fn spawn_feed<F>(path: &Path, clock: Clock, emit: F) -> SensorStatus
where
    F: FnMut(MotionSample) -> bool + Send + 'static,
{
    if !path.exists() {
        log::warn!("no motion feed at {}, tilt input disabled", path.display());
        return SensorStatus::Unavailable(format!("{} not found", path.display()));
    }

    let feed_path = path.to_path_buf();
    thread::spawn(move || {
        // Opening a FIFO blocks until a writer shows up
        let file = match File::open(&feed_path) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("cannot open motion feed {}: {e}", feed_path.display());
                return;
            }
        };
        log::info!("motion feed {} connected", feed_path.display());
        let count = read_samples(BufReader::new(file), &clock, emit);
        log::info!("motion feed closed after {count} samples");
    });

    SensorStatus::Listening(path.to_path_buf())
}
