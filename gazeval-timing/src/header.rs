//! Recording-start timestamps from tracker file headers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ClockError;

/// Where and how a device writes its recording-start wall clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderFormat {
    /// Text that precedes the timestamp, e.g. `"Recording time:"`.
    #[serde(default)]
    pub key: Option<String>,
    /// `chrono` format string, e.g. `"%d.%m.%Y %H:%M:%S%.f"`.
    pub format: String,
}

impl Default for HeaderFormat {
    fn default() -> Self {
        Self {
            key: None,
            format: "%Y-%m-%d %H:%M:%S%.f".to_string(),
        }
    }
}

impl HeaderFormat {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            key: None,
            format: format.into(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// Parses the recording-start wall clock out of raw header text.
///
/// The timestamp may be embedded in other text; the first position at which
/// the format matches wins. With a `key`, only text after the key's first
/// occurrence is searched.
pub fn parse_recording_start(
    header: &str,
    format: &HeaderFormat,
) -> Result<NaiveDateTime, ClockError> {
    let haystack = match &format.key {
        Some(key) => match header.find(key.as_str()) {
            Some(at) => &header[at + key.len()..],
            None => {
                return Err(ClockError::invalid_header(
                    header,
                    format!("key {key:?} not found"),
                ));
            }
        },
        None => header,
    };

    let start = haystack
        .char_indices()
        .find_map(|(i, _)| {
            NaiveDateTime::parse_and_remainder(&haystack[i..], &format.format)
                .ok()
                .map(|(dt, _)| dt)
        })
        .ok_or_else(|| {
            ClockError::invalid_header(
                header,
                format!("no timestamp matching {:?}", format.format),
            )
        })?;

    debug!(%start, "parsed recording start");
    Ok(start)
}
