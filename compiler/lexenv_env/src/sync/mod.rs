//! Thread-safe scope chain.
//!
//! Same resolution, shadowing and capture rules as [`crate::ScopeRef`], for
//! hosts that invoke closures from several threads against shared scopes.
//!
//! # Locking
//!
//! - Each scope's binding table sits behind its own `RwLock`. `declare` takes
//!   the write lock, so declarations into one scope are serialized.
//! - Each binding's value sits behind its own `RwLock`. `assign` walks the
//!   chain under read locks, then takes the write lock of the binding it
//!   resolved to, so writes to one binding are serialized while writes to
//!   distinct bindings proceed in parallel.
//! - `lookup` only takes read locks. Ordering against earlier writes comes
//!   from the locks themselves.
//!
//! Parent links are immutable after creation and are walked without locking.
//! No lock is held across a call into user code.

// Arc is the implementation of the sync handles
#![expect(
    clippy::disallowed_types,
    reason = "Arc is the implementation of SyncScopeRef<V>"
)]

use std::fmt;
use std::sync::{Arc, Weak};

use lexenv_ir::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{EnvError, EnvResult, Resource};
use crate::scope::ScopeKind;

struct SyncScope<V> {
    bindings: RwLock<FxHashMap<Name, SyncBindingRef<V>>>,
    parent: Option<SyncScopeRef<V>>,
    kind: ScopeKind,
    depth: usize,
}

impl<V> Drop for SyncScope<V> {
    // Iterative unlink, as for the single-threaded chain.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            next = match Arc::try_unwrap(parent.0) {
                Ok(mut scope) => scope.parent.take(),
                Err(_) => None,
            };
        }
    }
}

/// Thread-safe shared handle to a scope.
pub struct SyncScopeRef<V>(Arc<SyncScope<V>>);

impl<V> SyncScopeRef<V> {
    fn alloc(parent: Option<SyncScopeRef<V>>, kind: ScopeKind, depth: usize) -> Self {
        SyncScopeRef(Arc::new(SyncScope {
            bindings: RwLock::new(FxHashMap::default()),
            parent,
            kind,
            depth,
        }))
    }

    /// Create a root scope of kind [`ScopeKind::Global`].
    pub fn root() -> Self {
        Self::alloc(None, ScopeKind::Global, 0)
    }

    /// Create a scope whose parent is `parent`.
    pub fn child(parent: &SyncScopeRef<V>, kind: ScopeKind) -> Self {
        let depth = parent.depth() + 1;
        tracing::trace!(%kind, depth, "create sync scope");
        Self::alloc(Some(parent.clone()), kind, depth)
    }

    pub fn kind(&self) -> ScopeKind {
        self.0.kind
    }

    pub fn depth(&self) -> usize {
        self.0.depth
    }

    pub fn parent(&self) -> Option<&SyncScopeRef<V>> {
        self.0.parent.as_ref()
    }

    pub fn ptr_eq(&self, other: &SyncScopeRef<V>) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn contains_local(&self, name: Name) -> bool {
        self.0.bindings.read().contains_key(&name)
    }

    pub fn local_len(&self) -> usize {
        self.0.bindings.read().len()
    }

    /// Create a binding for `name` in this scope, replacing any binding of
    /// `name` this scope already owns.
    pub fn declare(&self, name: Name, value: V) -> EnvResult<SyncBindingRef<V>> {
        let binding = SyncBindingRef(Arc::new(SyncSlot {
            name,
            value: RwLock::new(value),
            scope: Arc::downgrade(&self.0),
        }));
        let previous = {
            let mut bindings = self.0.bindings.write();
            bindings
                .try_reserve(1)
                .map_err(|_| EnvError::ResourceExhausted {
                    resource: Resource::Binding,
                })?;
            bindings.insert(name, binding.clone())
        };
        tracing::trace!(
            ?name,
            depth = self.0.depth,
            redeclared = previous.is_some(),
            "declare (sync)"
        );
        Ok(binding)
    }

    /// The binding `name` resolves to from this scope.
    pub fn resolve(&self, name: Name) -> EnvResult<SyncBindingRef<V>> {
        let mut scope = self;
        loop {
            if let Some(binding) = scope.0.bindings.read().get(&name) {
                return Ok(binding.clone());
            }
            match &scope.0.parent {
                Some(parent) => scope = parent,
                None => {
                    tracing::debug!(?name, "unresolved identifier (sync)");
                    return Err(EnvError::unresolved(name));
                }
            }
        }
    }

    /// Overwrite the value of the binding `name` resolves to, in place.
    pub fn assign(&self, name: Name, value: V) -> EnvResult<()> {
        let binding = self.resolve(name)?;
        drop(binding.replace(value));
        Ok(())
    }

    /// Capture this scope for a [`SyncClosure`].
    pub fn capture(&self) -> SyncEnvRef<V> {
        SyncEnvRef(self.clone())
    }
}

impl<V: Clone> SyncScopeRef<V> {
    pub fn lookup(&self, name: Name) -> EnvResult<V> {
        self.resolve(name).map(|binding| binding.get())
    }
}

impl<V> Clone for SyncScopeRef<V> {
    fn clone(&self) -> Self {
        SyncScopeRef(Arc::clone(&self.0))
    }
}

impl<V> fmt::Debug for SyncScopeRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncScopeRef")
            .field("kind", &self.0.kind)
            .field("depth", &self.0.depth)
            .finish_non_exhaustive()
    }
}

struct SyncSlot<V> {
    name: Name,
    value: RwLock<V>,
    scope: Weak<SyncScope<V>>,
}

/// Thread-safe shared handle to one binding object.
pub struct SyncBindingRef<V>(Arc<SyncSlot<V>>);

impl<V> SyncBindingRef<V> {
    pub fn name(&self) -> Name {
        self.0.name
    }

    /// Overwrite the value in place, returning the old one.
    pub fn replace(&self, value: V) -> V {
        std::mem::replace(&mut *self.0.value.write(), value)
    }

    /// Apply `f` to the value under the binding's write lock.
    ///
    /// Unlike a lookup followed by an assign, no other writer can interleave.
    pub fn update<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.0.value.write())
    }

    /// The owning scope, if it is still live.
    pub fn declared_scope(&self) -> Option<SyncScopeRef<V>> {
        self.0.scope.upgrade().map(SyncScopeRef)
    }

    pub fn ptr_eq(&self, other: &SyncBindingRef<V>) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<V: Clone> SyncBindingRef<V> {
    pub fn get(&self) -> V {
        self.0.value.read().clone()
    }
}

impl<V> Clone for SyncBindingRef<V> {
    fn clone(&self) -> Self {
        SyncBindingRef(Arc::clone(&self.0))
    }
}

/// A captured [`SyncScopeRef`].
pub struct SyncEnvRef<V>(SyncScopeRef<V>);

impl<V> SyncEnvRef<V> {
    pub fn scope(&self) -> &SyncScopeRef<V> {
        &self.0
    }

    pub fn declare(&self, name: Name, value: V) -> EnvResult<SyncBindingRef<V>> {
        self.0.declare(name, value)
    }

    pub fn resolve(&self, name: Name) -> EnvResult<SyncBindingRef<V>> {
        self.0.resolve(name)
    }

    pub fn assign(&self, name: Name, value: V) -> EnvResult<()> {
        self.0.assign(name, value)
    }
}

impl<V: Clone> SyncEnvRef<V> {
    pub fn lookup(&self, name: Name) -> EnvResult<V> {
        self.0.lookup(name)
    }
}

impl<V> Clone for SyncEnvRef<V> {
    fn clone(&self) -> Self {
        SyncEnvRef(self.0.clone())
    }
}

type SyncBody<V> = dyn Fn(&SyncScopeRef<V>, &[V]) -> EnvResult<V> + Send + Sync;

/// A closure that can be shared across threads.
///
/// `Send + Sync` whenever `V: Send + Sync`.
pub struct SyncClosure<V> {
    body: Arc<SyncBody<V>>,
    env: SyncEnvRef<V>,
}

impl<V> SyncClosure<V> {
    pub fn new<F>(env: SyncEnvRef<V>, body: F) -> Self
    where
        F: Fn(&SyncScopeRef<V>, &[V]) -> EnvResult<V> + Send + Sync + 'static,
    {
        SyncClosure {
            body: Arc::new(body),
            env,
        }
    }

    pub fn env(&self) -> &SyncEnvRef<V> {
        &self.env
    }

    /// Invoke the closure in a fresh [`ScopeKind::Closure`] scope under the
    /// captured one.
    pub fn call(&self, args: &[V]) -> EnvResult<V> {
        let frame = SyncScopeRef::child(self.env.scope(), ScopeKind::Closure);
        (self.body)(&frame, args)
    }
}

impl<V> Clone for SyncClosure<V> {
    fn clone(&self) -> Self {
        SyncClosure {
            body: Arc::clone(&self.body),
            env: self.env.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
