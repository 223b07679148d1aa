use std::{fs, io, path::Path, time::SystemTime};

use chrono::{DateTime, Local};
use log::warn;
use serde::Serialize;

use crate::{config::STAT_ERROR_MARKER, path::display_name, probe::Probe};

const ISO_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";
const ISO_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// The `timestamps` mapping of a record. Always exactly three keys.
///
/// Times are rendered in the local time zone without an offset.
/// `created_or_changed` is the inode change time on Unix and the creation
/// time elsewhere, so it is advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timestamps {
    pub modified: Probe<String>,
    pub accessed: Probe<String>,
    pub created_or_changed: Probe<String>,
}

impl Timestamps {
    fn failed() -> Self {
        Self {
            modified: Probe::Failed(STAT_ERROR_MARKER),
            accessed: Probe::Failed(STAT_ERROR_MARKER),
            created_or_changed: Probe::Failed(STAT_ERROR_MARKER),
        }
    }
}

/// Microsecond precision; the fraction is left out when it is zero.
pub fn format_local(time: DateTime<Local>) -> String {
    let format = if time.timestamp_subsec_micros() == 0 {
        ISO_SECONDS
    } else {
        ISO_MICROS
    };
    time.naive_local().format(format).to_string()
}

fn format_system_time(time: SystemTime) -> String {
    format_local(DateTime::<Local>::from(time))
}

#[cfg(unix)]
fn created_or_changed(meta: &fs::Metadata) -> io::Result<DateTime<Local>> {
    use std::os::unix::fs::MetadataExt;

    let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
    DateTime::from_timestamp(meta.ctime(), nanos)
        .map(|utc| utc.with_timezone(&Local))
        .ok_or_else(|| io::Error::other("ctime out of range"))
}

#[cfg(not(unix))]
fn created_or_changed(meta: &fs::Metadata) -> io::Result<DateTime<Local>> {
    meta.created().map(DateTime::<Local>::from)
}

fn stat_times(path: &Path) -> io::Result<(String, String, String)> {
    let meta = fs::metadata(path)?;

    Ok((
        format_system_time(meta.modified()?),
        format_system_time(meta.accessed()?),
        format_local(created_or_changed(&meta)?),
    ))
}

pub fn read_timestamps(path: &Path) -> Timestamps {
    match stat_times(path) {
        Ok((modified, accessed, changed)) => Timestamps {
            modified: Probe::Ok(modified),
            accessed: Probe::Ok(accessed),
            created_or_changed: Probe::Ok(changed),
        },
        Err(e) => {
            warn!("error getting timestamps for '{}': {e}", display_name(path));
            Timestamps::failed()
        }
    }
}

#[cfg(test)]
#[path = "timestamps_tests.rs"]
mod tests;
