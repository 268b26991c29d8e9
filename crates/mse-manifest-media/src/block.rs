//! Frame descriptors supplied by the block decoder.
//!
//! The decoder that walks the container reports, for every frame of a media
//! segment, its index, byte size and flags byte. Only the keyframe bit of the
//! flags is interpreted here.

use std::fmt;

/// Raw flags byte of a block, as reported by the block decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BlockFlags(pub u8);

impl BlockFlags {
    /// Keyframe bit.
    pub const KEYFRAME: u8 = 0x80;

    /// Whether the keyframe bit is set.
    pub fn is_keyframe(self) -> bool {
        (self.0 & Self::KEYFRAME) != 0
    }

    /// Raw flags value.
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl From<u8> for BlockFlags {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl fmt::Display for BlockFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Frame descriptor produced by the block decoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockInfo {
    /// Frame index within the segment, in presentation order.
    pub index: u64,
    /// Size of the frame in bytes.
    pub size: u64,
    /// Flags byte.
    pub flags: BlockFlags,
}

impl BlockInfo {
    /// Create a new block descriptor.
    pub fn new(index: u64, size: u64, flags: impl Into<BlockFlags>) -> Self {
        Self {
            index,
            size,
            flags: flags.into(),
        }
    }

    /// Descriptor carrying only an index and flags.
    pub fn from_flags(index: u64, flags: u8) -> Self {
        Self::new(index, 0, flags)
    }
}

/// Anything the block decoder hands out as a frame.
pub trait Block {
    /// Flags byte of this frame.
    fn flags(&self) -> BlockFlags;

    /// Whether this frame is a keyframe.
    fn is_keyframe(&self) -> bool {
        self.flags().is_keyframe()
    }
}

impl Block for BlockInfo {
    fn flags(&self) -> BlockFlags {
        self.flags
    }
}

impl Block for BlockFlags {
    fn flags(&self) -> BlockFlags {
        *self
    }
}

impl Block for u8 {
    fn flags(&self) -> BlockFlags {
        BlockFlags(*self)
    }
}

impl<B: Block + ?Sized> Block for &B {
    fn flags(&self) -> BlockFlags {
        (**self).flags()
    }
}

/// Zero-based positions of the keyframes in `blocks`, ascending.
pub fn keyframe_indices<B: Block>(blocks: &[B]) -> Vec<u64> {
    blocks
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_keyframe())
        .map(|(i, _)| i as u64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyframe_bit() {
        assert!(BlockFlags(0x80).is_keyframe());
        assert!(BlockFlags(0x81).is_keyframe());
        assert!(BlockFlags(0xff).is_keyframe());
        assert!(!BlockFlags(0x00).is_keyframe());
        assert!(!BlockFlags(0x7f).is_keyframe());
        assert!(!BlockFlags(0x08).is_keyframe());
    }

    #[test]
    fn test_keyframe_indices() {
        let blocks = [0x80u8, 0x00, 0x80, 0x01, 0x81];
        assert_eq!(keyframe_indices(&blocks), vec![0, 2, 4]);
    }

    #[test]
    fn test_keyframe_indices_ignore_stored_index() {
        // Positions come from ordering, not from the decoder's index field.
        let blocks = vec![
            BlockInfo::from_flags(10, 0x00),
            BlockInfo::from_flags(11, 0x80),
        ];
        assert_eq!(keyframe_indices(&blocks), vec![1]);
    }

    #[test]
    fn test_keyframe_indices_empty() {
        let blocks: Vec<BlockInfo> = Vec::new();
        assert!(keyframe_indices(&blocks).is_empty());
        assert!(keyframe_indices(&[0x00u8, 0x40]).is_empty());
    }

    #[test]
    fn test_block_by_reference() {
        let info = BlockInfo::new(0, 1200, 0x80);
        let refs = vec![&info, &info];
        assert_eq!(keyframe_indices(&refs), vec![0, 1]);
    }

    #[test]
    fn test_index_beyond_u32() {
        let index = u64::from(u32::MAX) + 7;
        let info = BlockInfo::from_flags(index, 0x80);
        assert_eq!(info.index, 4_294_967_302);

        let positions: Vec<u64> = keyframe_indices(&[0x00u8, 0x80]);
        assert_eq!(positions, vec![1u64]);
    }

    #[test]
    fn test_flags_display() {
        assert_eq!(BlockFlags(0x80).to_string(), "0x80");
        assert_eq!(BlockFlags(0x01).to_string(), "0x01");
    }
}
