//! JSON manifest document.
//!
//! [`ManifestDocument`] is the wire form of a [`Manifest`]. Building it
//! performs every derived field (live flag, keyframe positions, tick count
//! and tick size); serde takes care of the text. Per-track values are keyed
//! by the fixed track id `"1"`.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::manifest::{Manifest, MediaSegment, PresentationDuration};

/// Value written for the per-segment `type` field.
pub const SEGMENT_TYPE_PLACEHOLDER: &str = "TODO";

/// A value for the single track, serialized as `{"1": value}`.
///
/// The track id is fixed by the `rename` on `value`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerTrack<T> {
    #[serde(rename = "1")]
    pub value: T,
}

impl<T> PerTrack<T> {
    /// Wrap a value for the single track.
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

/// Byte range of the init segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitDocument {
    pub offset: u64,
    pub size: u64,
}

/// One entry of the `media` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDocument {
    pub offset: u64,
    pub size: u64,
    #[serde(rename = "type")]
    pub segment_type: String,
    pub timecode: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idr_frames: Option<PerTrack<Vec<u64>>>,
    pub tick_count: PerTrack<u64>,
    pub tick_size: PerTrack<f64>,
}

impl MediaDocument {
    fn from_segment(segment: &MediaSegment, video: bool, tick_size: f64) -> Self {
        Self {
            offset: segment.offset,
            size: segment.size,
            segment_type: SEGMENT_TYPE_PLACEHOLDER.to_string(),
            timecode: segment.timecode,
            idr_frames: video.then(|| PerTrack::new(segment.keyframe_indices())),
            tick_count: PerTrack::new(segment.tick_count()),
            tick_size: PerTrack::new(tick_size),
        }
    }
}

/// The complete manifest document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestDocument {
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub timescale: PerTrack<u64>,
    #[serde(
        rename = "startDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
    pub init: InitDocument,
    pub media: Vec<MediaDocument>,
}

impl ManifestDocument {
    /// Build the document for a manifest.
    pub fn from_manifest(manifest: &Manifest) -> Self {
        // A finite duration equal to the sentinel still means live.
        let duration = PresentationDuration::from_secs(manifest.duration.as_secs());
        let (live, duration) = match duration {
            PresentationDuration::Live => (Some(true), None),
            PresentationDuration::Finite(secs) => (None, Some(secs)),
        };

        let video = manifest.is_video();
        let tick_size = manifest.tick_size();

        Self {
            content_type: manifest.content_type.clone(),
            live,
            duration,
            timescale: PerTrack::new(manifest.timecode_scale),
            start_date: manifest.start_date.as_ref().map(format_start_date),
            init: InitDocument {
                offset: manifest.init.offset,
                size: manifest.init.size,
            },
            media: manifest
                .media
                .iter()
                .map(|segment| MediaDocument::from_segment(segment, video, tick_size))
                .collect(),
        }
    }

    /// Parse a manifest document from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a manifest document from a slice of bytes.
    pub fn from_slice(v: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(v)?)
    }

    /// Whether the document describes a live stream.
    pub fn is_live(&self) -> bool {
        self.live == Some(true)
    }

    /// Parsed `startDate`, if present.
    pub fn parsed_start_date(&self) -> Result<Option<DateTime<Utc>>> {
        match &self.start_date {
            Some(s) => Ok(Some(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))),
            None => Ok(None),
        }
    }

    /// Serialize the document to a compact string.
    pub fn to_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the document to an indented string ending in a newline.
    pub fn to_string_pretty(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

fn format_start_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Options for rendering a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Indent the output.
    pub pretty: bool,
    /// Run [`Manifest::validate`] before rendering.
    pub validate: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            validate: false,
        }
    }
}

impl Manifest {
    /// Build the wire document for this manifest.
    pub fn to_document(&self) -> ManifestDocument {
        ManifestDocument::from_manifest(self)
    }

    /// Render the manifest as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        self.render(&RenderOptions {
            pretty: false,
            validate: false,
        })
    }

    /// Render the manifest as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        self.render(&RenderOptions::default())
    }

    /// Render the manifest with the given options.
    pub fn render(&self, options: &RenderOptions) -> Result<String> {
        if options.validate {
            if let Err(e) = self.validate() {
                tracing::warn!("Refusing to render manifest: {}", e);
                return Err(e);
            }
        }

        let document = self.to_document();
        let out = if options.pretty {
            document.to_string_pretty()?
        } else {
            document.to_string()?
        };

        tracing::debug!(
            content_type = %self.content_type,
            live = self.is_live(),
            segments = self.media.len(),
            bytes = out.len(),
            "Rendered manifest"
        );

        Ok(out)
    }

    /// Write the manifest as indented JSON.
    pub fn to_writer(&self, mut writer: impl Write) -> Result<()> {
        let out = self.to_json_pretty()?;
        writer.write_all(out.as_bytes())?;
        Ok(())
    }
}
