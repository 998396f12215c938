/// Failures that leave a recording without a clock anchor
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The recording-start timestamp could not be read from the device header.
    #[error("invalid recording header ({reason}): {header:?}")]
    InvalidHeader { header: String, reason: String },

    #[error("tick-counter recording contains no samples")]
    EmptyRecording,
}

impl ClockError {
    pub(crate) fn invalid_header(header: &str, reason: impl Into<String>) -> Self {
        ClockError::InvalidHeader {
            header: header.to_string(),
            reason: reason.into(),
        }
    }
}
