//! Lexenv IR - identifier types shared by the environment engine and its hosts.
//!
//! Every identifier that reaches a scope is interned first:
//! - [`Name`]: a copyable 32-bit handle, O(1) equality and hashing
//! - [`StringInterner`]: sharded, lock-per-shard interner that hands out names
//! - [`SharedInterner`]: thread-safe owned handle to one interner
//! - [`StringLookup`]: resolve a name back to its text without naming the interner type

mod interner;
mod name;

pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
