//! Mse-Manifest-Media: segment model and JSON manifest serialization
//!
//! This crate turns container metadata (init segment byte range, media
//! segment byte ranges, timecodes and per-frame flags) into the JSON
//! manifest a Media Source Extensions client uses to fetch and present an
//! asset.
//!
//! # Modules
//!
//! - `block` - Frame descriptors from the block decoder and the keyframe test
//! - `manifest` - Manifest model, builder and concurrent segment collector
//! - `json` - Typed manifest document and rendering options
//!
//! # Example
//!
//! ```
//! use mse_manifest_media::{BlockInfo, InitSegment, Manifest, MediaSegment};
//!
//! let segment = MediaSegment::with_frames(
//!     500,
//!     2000,
//!     0.0,
//!     vec![BlockInfo::from_flags(0, 0x80), BlockInfo::from_flags(1, 0x00)],
//! );
//!
//! let manifest = Manifest::builder()
//!     .content_type("video/webm")
//!     .timecode_scale(1_000_000)
//!     .default_track_duration(40_000)
//!     .init(InitSegment::new(0, 500))
//!     .segment(segment)
//!     .build()
//!     .unwrap();
//!
//! let json = manifest.to_json().unwrap();
//! assert!(json.contains(r#""live":true"#));
//! assert!(json.contains(r#""idr_frames":{"1":[0]}"#));
//! ```

pub mod block;
pub mod error;
pub mod json;
pub mod manifest;

pub use block::{Block, BlockFlags, BlockInfo};
pub use error::{Error, Result};
pub use json::{ManifestDocument, RenderOptions};
pub use manifest::{
    InitSegment, Manifest, ManifestBuilder, MediaSegment, PresentationDuration, SegmentCollector,
};
