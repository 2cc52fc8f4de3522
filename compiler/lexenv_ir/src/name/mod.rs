//! Identifier handles.

use std::fmt;

/// An interned identifier.
///
/// The 32 bits pack the interner shard that owns the text (top
/// [`Name::SHARD_BITS`] bits) and the position of the text inside that shard
/// (the rest). Two names are equal exactly when the same interner produced
/// them from equal strings, so scope tables compare and hash plain integers.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    pub const SHARD_BITS: u32 = 4;

    /// Shards per interner.
    pub const SHARDS: usize = 1 << Self::SHARD_BITS;

    /// Largest position a shard can hand out.
    pub const LOCAL_LIMIT: u32 = u32::MAX >> Self::SHARD_BITS;

    /// The empty identifier; every interner maps it to `""`.
    pub const EMPTY: Name = Name(0);

    const LOCAL_BITS: u32 = u32::BITS - Self::SHARD_BITS;

    /// Pack a shard index and a position within that shard.
    #[inline]
    pub const fn from_parts(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::SHARDS);
        debug_assert!(local <= Self::LOCAL_LIMIT);
        Name((shard << Self::LOCAL_BITS) | local)
    }

    #[inline]
    pub const fn shard_index(self) -> usize {
        (self.0 >> Self::LOCAL_BITS) as usize
    }

    #[inline]
    pub const fn local_index(self) -> usize {
        (self.0 & Self::LOCAL_LIMIT) as usize
    }

    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({}:{})", self.shard_index(), self.local_index())
    }
}

impl Default for Name {
    fn default() -> Self {
        Name::EMPTY
    }
}
