//! Manifest builder.

use chrono::{DateTime, Utc};

use super::{InitSegment, Manifest, MediaSegment, PresentationDuration};
use crate::error::{Error, Result};

/// Builder for creating manifests.
///
/// Starts out as an empty live manifest. The init segment is the only
/// required field.
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
    content_type: String,
    duration: PresentationDuration,
    start_date: Option<DateTime<Utc>>,
    timecode_scale: u64,
    default_track_duration: u64,
    init: Option<InitSegment>,
    media: Vec<MediaSegment>,
}

impl ManifestBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content type.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the duration.
    pub fn duration(mut self, duration: PresentationDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the duration in seconds; exactly `-1` marks a live stream.
    pub fn duration_secs(mut self, secs: f64) -> Self {
        self.duration = PresentationDuration::from_secs(secs);
        self
    }

    /// Mark the manifest as live.
    pub fn live(mut self) -> Self {
        self.duration = PresentationDuration::Live;
        self
    }

    /// Set the wall-clock start date.
    pub fn start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Set the timecode scale.
    pub fn timecode_scale(mut self, scale: u64) -> Self {
        self.timecode_scale = scale;
        self
    }

    /// Set the default track duration.
    pub fn default_track_duration(mut self, duration: u64) -> Self {
        self.default_track_duration = duration;
        self
    }

    /// Set the init segment.
    pub fn init(mut self, init: InitSegment) -> Self {
        self.init = Some(init);
        self
    }

    /// Append a media segment.
    pub fn segment(mut self, segment: MediaSegment) -> Self {
        self.media.push(segment);
        self
    }

    /// Append media segments in order.
    pub fn segments(mut self, segments: impl IntoIterator<Item = MediaSegment>) -> Self {
        self.media.extend(segments);
        self
    }

    /// Build the manifest.
    ///
    /// Fails if no init segment was set.
    pub fn build(self) -> Result<Manifest> {
        let init = self.init.ok_or(Error::MissingInitSegment)?;

        Ok(Manifest {
            content_type: self.content_type,
            duration: self.duration,
            start_date: self.start_date,
            timecode_scale: self.timecode_scale,
            default_track_duration: self.default_track_duration,
            init,
            media: self.media,
        })
    }
}
