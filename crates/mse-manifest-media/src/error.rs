//! Error types for mse-manifest-media.

use std::io;
use thiserror::Error;

/// Result type for mse-manifest-media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for mse-manifest-media operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A manifest was built without an initialization segment.
    #[error("Manifest has no initialization segment")]
    MissingInitSegment,

    /// Finite duration is NaN or infinite.
    #[error("Non-finite duration: {0}")]
    NonFiniteDuration(f64),

    /// A media segment timecode is NaN or infinite.
    #[error("Non-finite timecode {timecode} in media segment {segment}")]
    NonFiniteTimecode { segment: usize, timecode: f64 },

    /// A media segment byte range overlaps the initialization segment.
    #[error("Media segment {segment} overlaps the initialization segment")]
    SegmentOverlapsInit { segment: usize },

    /// A segment collector was finished while other handles were alive.
    #[error("Segment collector finished while {0} producer handle(s) are still alive")]
    ProducersStillActive(usize),

    /// The manifest's start date is not an RFC 3339 timestamp.
    #[error("Invalid start date: {0}")]
    InvalidStartDate(#[from] chrono::ParseError),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::MissingInitSegment.to_string(),
            "Manifest has no initialization segment"
        );

        let err = Error::NonFiniteTimecode {
            segment: 3,
            timecode: f64::NAN,
        };
        assert_eq!(err.to_string(), "Non-finite timecode NaN in media segment 3");

        let err = Error::ProducersStillActive(2);
        assert_eq!(
            err.to_string(),
            "Segment collector finished while 2 producer handle(s) are still alive"
        );

        let err = Error::SegmentOverlapsInit { segment: 0 };
        assert_eq!(
            err.to_string(),
            "Media segment 0 overlaps the initialization segment"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Json(_)));
    }
}
