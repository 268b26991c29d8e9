//! Manifest model.
//!
//! A manifest describes one track split into an initialization segment and
//! an ordered list of media segments. The caller fills it in while walking
//! the container and renders it once at the end (see [`crate::json`]).

mod builder;
mod collector;

pub use builder::ManifestBuilder;
pub use collector::SegmentCollector;

use chrono::{DateTime, Utc};

use crate::block::{self, Block, BlockInfo};
use crate::error::{Error, Result};

/// Byte range of the initialization segment in the source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitSegment {
    /// Byte offset.
    pub offset: u64,
    /// Length in bytes.
    pub size: u64,
}

impl InitSegment {
    /// Create a new init segment descriptor.
    pub fn new(offset: u64, size: u64) -> Self {
        Self { offset, size }
    }

    /// First byte past the end of the segment.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }
}

/// One fetchable chunk of media data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSegment {
    /// Byte offset in the source file.
    pub offset: u64,
    /// Length in bytes.
    pub size: u64,
    /// Presentation time in seconds at which the segment begins.
    pub timecode: f64,
    /// Frames of the segment in presentation order.
    pub frames: Vec<BlockInfo>,
}

impl MediaSegment {
    /// Create a segment with no frames.
    pub fn new(offset: u64, size: u64, timecode: f64) -> Self {
        Self {
            offset,
            size,
            timecode,
            frames: Vec::new(),
        }
    }

    /// Create a segment with the given frames.
    pub fn with_frames(offset: u64, size: u64, timecode: f64, frames: Vec<BlockInfo>) -> Self {
        Self {
            offset,
            size,
            timecode,
            frames,
        }
    }

    /// Create a segment from a decoder's own block type.
    ///
    /// Only the flags of each block are read; the frame index is its
    /// position in `blocks`.
    pub fn from_blocks<B: Block>(offset: u64, size: u64, timecode: f64, blocks: &[B]) -> Self {
        let frames = blocks
            .iter()
            .enumerate()
            .map(|(i, b)| BlockInfo::new(i as u64, 0, b.flags()))
            .collect();
        Self::with_frames(offset, size, timecode, frames)
    }

    /// Append a frame.
    pub fn push_frame(&mut self, frame: BlockInfo) {
        self.frames.push(frame);
    }

    /// Number of ticks (frames) in this segment.
    pub fn tick_count(&self) -> u64 {
        self.frames.len() as u64
    }

    /// Positions of keyframes within this segment, ascending.
    pub fn keyframe_indices(&self) -> Vec<u64> {
        block::keyframe_indices(&self.frames)
    }

    /// First byte past the end of the segment.
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }
}

/// Presentation duration of a manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PresentationDuration {
    /// Live stream with unbounded duration.
    #[default]
    Live,
    /// Finite duration in seconds.
    Finite(f64),
}

impl PresentationDuration {
    /// Sentinel used on the wire for a live stream.
    pub const LIVE_SENTINEL: f64 = -1.0;

    /// Map a duration in seconds, where exactly `-1` means live.
    #[allow(clippy::float_cmp)]
    pub fn from_secs(secs: f64) -> Self {
        if secs == Self::LIVE_SENTINEL {
            Self::Live
        } else {
            Self::Finite(secs)
        }
    }

    /// Duration in seconds, `-1` for a live stream.
    pub fn as_secs(&self) -> f64 {
        match self {
            Self::Live => Self::LIVE_SENTINEL,
            Self::Finite(secs) => *secs,
        }
    }

    /// Whether this is a live stream, including `Finite(-1.0)`.
    pub fn is_live(&self) -> bool {
        matches!(Self::from_secs(self.as_secs()), Self::Live)
    }
}

impl From<f64> for PresentationDuration {
    fn from(secs: f64) -> Self {
        Self::from_secs(secs)
    }
}

/// Manifest for a single track.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// Content type, e.g. `video/webm; codecs="vp8"`.
    pub content_type: String,
    /// Live or finite duration.
    pub duration: PresentationDuration,
    /// Wall-clock start of the presentation, if known.
    pub start_date: Option<DateTime<Utc>>,
    /// Container time units per second for the track.
    pub timecode_scale: u64,
    /// Nominal duration of one tick, in the same unit family as the scale.
    pub default_track_duration: u64,
    /// Initialization segment.
    pub init: InitSegment,
    /// Media segments in playback order.
    pub media: Vec<MediaSegment>,
}

impl Manifest {
    /// Create an empty live manifest around an init segment.
    pub fn new(init: InitSegment) -> Self {
        Self {
            content_type: String::new(),
            duration: PresentationDuration::Live,
            start_date: None,
            timecode_scale: 0,
            default_track_duration: 0,
            init,
            media: Vec::new(),
        }
    }

    /// Create a new manifest builder.
    pub fn builder() -> ManifestBuilder {
        ManifestBuilder::new()
    }

    /// Append a media segment.
    pub fn push_segment(&mut self, segment: MediaSegment) {
        tracing::trace!(
            offset = segment.offset,
            size = segment.size,
            frames = segment.frames.len(),
            "Appending media segment"
        );
        self.media.push(segment);
    }

    /// Get segment count.
    pub fn segment_count(&self) -> usize {
        self.media.len()
    }

    /// Whether the manifest describes a live stream.
    pub fn is_live(&self) -> bool {
        self.duration.is_live()
    }

    /// Whether the content type is a video type.
    ///
    /// Keyframe positions are only reported for video.
    pub fn is_video(&self) -> bool {
        self.content_type.starts_with("video")
    }

    /// Duration of one tick, reported identically for every segment.
    pub fn tick_size(&self) -> f64 {
        self.default_track_duration as f64 / 1000.0
    }

    /// Check numeric fields that would otherwise render as malformed output.
    pub fn validate(&self) -> Result<()> {
        if let PresentationDuration::Finite(secs) = self.duration {
            if !secs.is_finite() {
                return Err(Error::NonFiniteDuration(secs));
            }
        }

        for (i, segment) in self.media.iter().enumerate() {
            if !segment.timecode.is_finite() {
                return Err(Error::NonFiniteTimecode {
                    segment: i,
                    timecode: segment.timecode,
                });
            }

            let overlaps = segment.size > 0
                && self.init.size > 0
                && segment.offset < self.init.end()
                && self.init.offset < segment.end();
            if overlaps {
                return Err(Error::SegmentOverlapsInit { segment: i });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_new_manifest_is_empty_and_live() {
        let manifest = Manifest::new(InitSegment::new(0, 100));
        assert_eq!(manifest.content_type, "");
        assert!(manifest.is_live());
        assert_eq!(manifest.duration.as_secs(), -1.0);
        assert_eq!(manifest.segment_count(), 0);
        assert!(manifest.start_date.is_none());
    }

    #[test]
    fn test_duration_sentinel() {
        assert_eq!(PresentationDuration::from_secs(-1.0), PresentationDuration::Live);
        assert_eq!(
            PresentationDuration::from_secs(-1.5),
            PresentationDuration::Finite(-1.5)
        );
        assert_eq!(
            PresentationDuration::from_secs(-0.999_999),
            PresentationDuration::Finite(-0.999_999)
        );
        assert_eq!(
            PresentationDuration::from_secs(12.5),
            PresentationDuration::Finite(12.5)
        );
        assert_eq!(PresentationDuration::Finite(3.0).as_secs(), 3.0);
        assert_eq!(PresentationDuration::default(), PresentationDuration::Live);
    }

    #[test]
    fn test_finite_sentinel_is_live() {
        assert!(PresentationDuration::Finite(-1.0).is_live());
        assert!(!PresentationDuration::Finite(-1.5).is_live());

        let mut manifest = Manifest::new(InitSegment::default());
        manifest.duration = PresentationDuration::Finite(-1.0);
        assert!(manifest.is_live());
    }

    #[test]
    fn test_is_video() {
        let mut manifest = Manifest::new(InitSegment::default());
        manifest.content_type = "video/webm".to_string();
        assert!(manifest.is_video());

        manifest.content_type = "audio/webm".to_string();
        assert!(!manifest.is_video());

        manifest.content_type = "Video/webm".to_string();
        assert!(!manifest.is_video());
    }

    #[test]
    fn test_tick_size() {
        let mut manifest = Manifest::new(InitSegment::default());
        manifest.default_track_duration = 40_000;
        assert_eq!(manifest.tick_size(), 40.0);

        manifest.default_track_duration = 33_367;
        assert_eq!(manifest.tick_size(), 33.367);
    }

    #[test]
    fn test_segment_ticks_and_keyframes() {
        let mut segment = MediaSegment::new(500, 2000, 0.0);
        assert_eq!(segment.tick_count(), 0);

        segment.push_frame(BlockInfo::from_flags(0, 0x80));
        segment.push_frame(BlockInfo::from_flags(1, 0x00));
        segment.push_frame(BlockInfo::from_flags(2, 0x80));

        assert_eq!(segment.tick_count(), 3);
        assert_eq!(segment.keyframe_indices(), vec![0, 2]);
    }

    #[test]
    fn test_segment_from_blocks() {
        let segment = MediaSegment::from_blocks(10, 20, 1.5, &[0x00u8, 0x80, 0x00]);
        assert_eq!(segment.tick_count(), 3);
        assert_eq!(segment.keyframe_indices(), vec![1]);
        assert_eq!(segment.frames[2].index, 2);
    }

    #[test]
    fn test_push_segment_preserves_order() {
        let mut manifest = Manifest::new(InitSegment::new(0, 10));
        for i in 0..5u64 {
            manifest.push_segment(MediaSegment::new(10 + i * 100, 100, i as f64));
        }
        let offsets: Vec<u64> = manifest.media.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![10, 110, 210, 310, 410]);
    }

    #[test]
    fn test_validate_ok() {
        let mut manifest = Manifest::new(InitSegment::new(0, 500));
        manifest.duration = PresentationDuration::Finite(10.0);
        manifest.push_segment(MediaSegment::new(500, 2000, 0.0));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut manifest = Manifest::new(InitSegment::new(0, 500));
        manifest.duration = PresentationDuration::Finite(f64::INFINITY);
        assert_matches!(manifest.validate(), Err(Error::NonFiniteDuration(_)));

        manifest.duration = PresentationDuration::Live;
        manifest.push_segment(MediaSegment::new(500, 10, 0.0));
        manifest.push_segment(MediaSegment::new(510, 10, f64::NAN));
        assert_matches!(
            manifest.validate(),
            Err(Error::NonFiniteTimecode { segment: 1, .. })
        );
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let mut manifest = Manifest::new(InitSegment::new(0, 500));
        manifest.push_segment(MediaSegment::new(499, 10, 0.0));
        assert_matches!(
            manifest.validate(),
            Err(Error::SegmentOverlapsInit { segment: 0 })
        );
    }
}
