//! RAII scope guard for [`Environment`].
//!
//! The guard pushes a scope when created and restores the stack to its
//! previous height when dropped, including during unwinding, so an early
//! `?` return or a panic inside a block body cannot leave the block's scope
//! on the stack.
//!
//! ```text
//! {
//!     let mut block = env.scoped(ScopeKind::Block);
//!     block.define(x, value)?;
//!     run_body(&mut block)?;
//! } // scope popped here
//! ```

use std::ops::{Deref, DerefMut};

use super::Environment;
use crate::scope::ScopeKind;

/// Guard returned by [`Environment::scoped`].
///
/// Derefs to the environment, so every environment method is available on it.
pub struct ScopeGuard<'env, V> {
    env: &'env mut Environment<V>,
    /// Stack height before the guarded scope was pushed.
    restore_to: usize,
}

impl<V> Drop for ScopeGuard<'_, V> {
    fn drop(&mut self) {
        self.env.truncate(self.restore_to);
    }
}

impl<V> Deref for ScopeGuard<'_, V> {
    type Target = Environment<V>;

    fn deref(&self) -> &Self::Target {
        self.env
    }
}

impl<V> DerefMut for ScopeGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.env
    }
}

impl<V> Environment<V> {
    /// Push a `kind` scope and return a guard that pops it on drop.
    ///
    /// Scopes pushed through the guard and not popped are removed too.
    pub fn scoped(&mut self, kind: ScopeKind) -> ScopeGuard<'_, V> {
        let restore_to = self.depth();
        self.push_scope(kind);
        ScopeGuard {
            env: self,
            restore_to,
        }
    }

    /// Run `f` inside a new `kind` scope.
    pub fn with_scope<R, F>(&mut self, kind: ScopeKind, f: F) -> R
    where
        F: FnOnce(&mut Environment<V>) -> R,
    {
        let mut scoped = self.scoped(kind);
        f(&mut scoped)
    }
}

#[cfg(test)]
mod tests;
