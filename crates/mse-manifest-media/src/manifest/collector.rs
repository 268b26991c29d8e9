//! Shared segment list for producers running in parallel.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{Manifest, ManifestBuilder, MediaSegment};
use crate::error::{Error, Result};

/// Cloneable handle that collects media segments from several producers.
///
/// Segments land in the order their `push` calls acquire the lock. Every
/// producer drops its handle when done; [`finish`](Self::finish) fails while
/// any other handle is still alive, so no segment pushed later can be lost.
#[derive(Debug, Clone, Default)]
pub struct SegmentCollector {
    segments: Arc<Mutex<Vec<MediaSegment>>>,
}

impl SegmentCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a media segment.
    pub fn push(&self, segment: MediaSegment) {
        let mut segments = self.segments.lock();
        tracing::trace!(
            index = segments.len(),
            offset = segment.offset,
            "Collected media segment"
        );
        segments.push(segment);
    }

    /// Number of segments collected so far.
    pub fn len(&self) -> usize {
        self.segments.lock().len()
    }

    /// Whether no segment has been collected.
    pub fn is_empty(&self) -> bool {
        self.segments.lock().is_empty()
    }

    /// Move the collected segments into `builder` and build the manifest.
    ///
    /// Fails with [`Error::ProducersStillActive`] if any clone of this
    /// handle has not been dropped yet.
    pub fn finish(self, builder: ManifestBuilder) -> Result<Manifest> {
        let segments = match Arc::try_unwrap(self.segments) {
            Ok(segments) => segments.into_inner(),
            Err(shared) => {
                let others = Arc::strong_count(&shared) - 1;
                tracing::warn!(
                    others,
                    "Segment collector finished with producers still active"
                );
                return Err(Error::ProducersStillActive(others));
            }
        };
        tracing::debug!(segments = segments.len(), "Finished collecting media segments");
        builder.segments(segments).build()
    }
}
