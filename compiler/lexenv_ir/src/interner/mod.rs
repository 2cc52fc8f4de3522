//! Sharded string interner for identifiers.
//!
//! Scopes key their binding tables by [`Name`], so every declaration, read and
//! write site interns its identifier once and afterwards compares integers.
//! Shards are guarded by separate `RwLock`s so hosts that run closures on
//! several threads can intern concurrently.

// Arc is the implementation of SharedInterner
#![expect(
    clippy::disallowed_types,
    reason = "Arc required for SharedInterner thread-safety"
)]

use std::borrow::Cow;
use std::fmt;
use std::hash::Hasher;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use super::Name;

/// Interning failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Every position in the shard that owns the text is taken.
    ShardOverflow { shard_idx: usize, count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::ShardOverflow { shard_idx, count } => write!(
                f,
                "identifier shard {shard_idx} is full ({count} names, max {})",
                Name::LOCAL_LIMIT
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// One shard: text to local index, and local index back to text.
#[derive(Default)]
struct Shard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Sharded string interner.
///
/// Interned strings are leaked and live for the rest of the process, which is
/// what lets [`StringInterner::lookup`] hand out `&'static str`.
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::SHARDS],
    len: AtomicUsize,
}

impl StringInterner {
    /// Create an interner holding only the empty string (as [`Name::EMPTY`]).
    pub fn new() -> Self {
        let shards = std::array::from_fn(|_| RwLock::new(Shard::default()));
        let interner = Self {
            shards,
            len: AtomicUsize::new(0),
        };
        // The empty string hashes to shard 0 and is interned first there,
        // which is exactly Name::EMPTY.
        interner.intern("");
        debug_assert_eq!(interner.intern(""), Name::EMPTY);
        interner
    }

    /// Shard owning `s`. The empty string always lands in shard 0.
    #[inline]
    fn shard_for(s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }
        let mut hasher = FxHasher::default();
        hasher.write(s.as_bytes());
        #[expect(
            clippy::cast_possible_truncation,
            reason = "only the low SHARD_BITS bits are kept"
        )]
        let low = hasher.finish() as usize;
        low % Name::SHARDS
    }

    fn try_intern_cow(&self, s: Cow<'_, str>) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(&s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is below Name::SHARDS"
        )]
        let shard_bits = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        if let Some(&local) = shard.read().map.get(s.as_ref()) {
            return Ok(Name::from_parts(shard_bits, local));
        }

        let mut guard = shard.write();
        // Another writer may have won the race between the two locks.
        if let Some(&local) = guard.map.get(s.as_ref()) {
            return Ok(Name::from_parts(shard_bits, local));
        }

        let count = guard.strings.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|local| *local <= Name::LOCAL_LIMIT)
            .ok_or(InternError::ShardOverflow { shard_idx, count })?;

        let leaked: &'static str = Box::leak(s.into_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, local);
        self.len.fetch_add(1, Ordering::Relaxed);

        Ok(Name::from_parts(shard_bits, local))
    }

    /// Intern `s`, or report that its shard is full.
    #[inline]
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        self.try_intern_cow(Cow::Borrowed(s))
    }

    /// Intern an owned string without copying it again.
    pub fn try_intern_owned(&self, s: String) -> Result<Name, InternError> {
        self.try_intern_cow(Cow::Owned(s))
    }

    /// Intern `s`.
    ///
    /// # Panics
    /// Panics if the shard for `s` is full; see [`StringInterner::try_intern`].
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Text for `name`.
    ///
    /// A name from a different interner resolves to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.shards
            .get(name.shard_index())
            .and_then(|shard| shard.read().strings.get(name.local_index()).copied())
            .unwrap_or("")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    /// `true` when nothing but the empty string has been interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Resolve interned names back to text.
///
/// Error rendering in the engine takes `&impl StringLookup` so callers can pass
/// either a borrowed [`StringInterner`] or a [`SharedInterner`].
pub trait StringLookup {
    /// Text for an interned name.
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}

/// Owned, clonable, thread-safe handle to one [`StringInterner`].
#[derive(Clone, Debug)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
