//! Scopes and the parent chain they resolve through.
//!
//! A scope is created when control enters a construct (call frame, block,
//! loop iteration, closure body) and is shared by every handle that still
//! refers to it: the construct itself, child scopes, and closures that
//! captured it. It is reclaimed when the last of those handles is dropped,
//! so its lifetime is that of its longest holder rather than its construct.

// Rc is the implementation of ScopeRef<V> and WeakScopeRef<V>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of ScopeRef<V>"
)]

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use lexenv_ir::Name;
use rustc_hash::FxHashMap;

use crate::binding::BindingRef;
use crate::closure::EnvRef;
use crate::errors::{EnvError, EnvResult, Resource};
use crate::stack::ensure_sufficient_stack;

/// The construct that introduced a scope.
///
/// Diagnostic metadata only: resolution never looks at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Process-wide root holding package-level variables.
    Global,
    /// Function call frame.
    Function,
    /// `if` / `switch` case / bare block body.
    Block,
    /// One iteration of a loop body.
    LoopIteration,
    /// Body of one closure invocation.
    Closure,
}

impl ScopeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Function => "function",
            ScopeKind::Block => "block",
            ScopeKind::LoopIteration => "loop-iteration",
            ScopeKind::Closure => "closure",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the chain: the bindings it owns and the link to its parent.
pub(crate) struct Scope<V> {
    bindings: FxHashMap<Name, BindingRef<V>>,
    parent: Option<ScopeRef<V>>,
    kind: ScopeKind,
    depth: usize,
}

impl<V> Scope<V> {
    /// Run `f` on the innermost binding of `name`, walking parents on a miss.
    fn with_binding<R>(&self, name: Name, f: impl FnOnce(&BindingRef<V>) -> R) -> Option<R> {
        if let Some(binding) = self.bindings.get(&name) {
            return Some(f(binding));
        }
        let parent = self.parent.as_ref()?;
        ensure_sufficient_stack(|| parent.0.borrow().with_binding(name, f))
    }
}

impl<V> Drop for Scope<V> {
    // Unlink the parent chain iteratively; dropping a long chain recursively
    // would use one native frame per scope.
    fn drop(&mut self) {
        tracing::trace!(kind = %self.kind, depth = self.depth, "release scope");
        let mut next = self.parent.take();
        while let Some(parent) = next {
            next = match Rc::try_unwrap(parent.0) {
                Ok(cell) => cell.into_inner().parent.take(),
                Err(_) => None,
            };
        }
    }
}

/// Shared handle to a scope.
///
/// Cloning is a reference-count bump; all clones see the same bindings.
#[repr(transparent)]
pub struct ScopeRef<V>(Rc<RefCell<Scope<V>>>);

impl<V> ScopeRef<V> {
    fn alloc(parent: Option<ScopeRef<V>>, kind: ScopeKind, depth: usize) -> Self {
        ScopeRef(Rc::new(RefCell::new(Scope {
            bindings: FxHashMap::default(),
            parent,
            kind,
            depth,
        })))
    }

    pub(crate) fn from_rc(rc: Rc<RefCell<Scope<V>>>) -> Self {
        ScopeRef(rc)
    }

    /// Create a root scope (no parent) of kind [`ScopeKind::Global`].
    pub fn root() -> Self {
        Self::root_with_kind(ScopeKind::Global)
    }

    /// Create a root scope of the given kind.
    pub fn root_with_kind(kind: ScopeKind) -> Self {
        tracing::trace!(%kind, "create root scope");
        Self::alloc(None, kind, 0)
    }

    /// Create a scope whose parent is `parent`.
    ///
    /// The child holds a strong reference to `parent`, so the parent chain
    /// lives at least as long as the child.
    pub fn child(parent: &ScopeRef<V>, kind: ScopeKind) -> Self {
        let depth = parent.depth() + 1;
        tracing::trace!(%kind, depth, "create scope");
        Self::alloc(Some(parent.clone()), kind, depth)
    }

    pub fn kind(&self) -> ScopeKind {
        self.0.borrow().kind
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.0.borrow().depth
    }

    pub fn parent(&self) -> Option<ScopeRef<V>> {
        self.0.borrow().parent.clone()
    }

    /// The root of this scope's chain.
    pub fn global(&self) -> ScopeRef<V> {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// `true` if both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &ScopeRef<V>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// A handle that observes the scope without keeping it alive.
    pub fn downgrade(&self) -> WeakScopeRef<V> {
        WeakScopeRef(Rc::downgrade(&self.0))
    }

    /// `true` if this scope itself (not an ancestor) binds `name`.
    pub fn contains_local(&self, name: Name) -> bool {
        self.0.borrow().bindings.contains_key(&name)
    }

    /// Number of bindings owned by this scope.
    pub fn local_len(&self) -> usize {
        self.0.borrow().bindings.len()
    }

    /// Names bound in this scope, sorted.
    pub fn local_names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.0.borrow().bindings.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Create a binding for `name` in this scope.
    ///
    /// An existing binding of `name` in this scope is replaced by a new
    /// binding object. Handles to the old binding keep their value and no
    /// longer affect lookups here. Bindings of `name` in ancestor scopes are
    /// untouched and simply shadowed.
    pub fn declare(&self, name: Name, value: V) -> EnvResult<BindingRef<V>> {
        let binding = BindingRef::new(name, value, Rc::downgrade(&self.0));
        // The displaced binding is dropped after the borrow is released: its
        // value may own the last handle to some other scope.
        let (previous, kind, depth) = {
            let mut scope = self.0.borrow_mut();
            scope
                .bindings
                .try_reserve(1)
                .map_err(|_| EnvError::ResourceExhausted {
                    resource: Resource::Binding,
                })?;
            let previous = scope.bindings.insert(name, binding.clone());
            (previous, scope.kind, scope.depth)
        };
        tracing::trace!(
            ?name,
            %kind,
            depth,
            redeclared = previous.is_some(),
            "declare"
        );
        Ok(binding)
    }

    /// The binding `name` resolves to from this scope.
    ///
    /// The nearest scope on the chain that binds `name` wins.
    pub fn resolve(&self, name: Name) -> EnvResult<BindingRef<V>> {
        self.0
            .borrow()
            .with_binding(name, BindingRef::clone)
            .ok_or_else(|| unresolved(name))
    }

    /// Overwrite the value of the binding `name` resolves to.
    ///
    /// The binding is mutated in place: it keeps its identity and owning
    /// scope, and every holder of it (or of its scope) sees the new value.
    /// Assigning a name bound nowhere on the chain is an error, never an
    /// implicit declaration.
    pub fn assign(&self, name: Name, value: V) -> EnvResult<()> {
        let previous = self
            .0
            .borrow()
            .with_binding(name, |binding| binding.replace(value))
            .ok_or_else(|| unresolved(name))?;
        drop(previous);
        Ok(())
    }

    /// Capture this scope for a closure.
    ///
    /// The returned reference keeps this scope and its whole parent chain
    /// alive, independent of the construct that created the scope.
    pub fn capture(&self) -> EnvRef<V> {
        EnvRef::new(self.clone())
    }
}

impl<V: Clone> ScopeRef<V> {
    /// Current value of the binding `name` resolves to from this scope.
    pub fn lookup(&self, name: Name) -> EnvResult<V> {
        self.0
            .borrow()
            .with_binding(name, BindingRef::get)
            .ok_or_else(|| unresolved(name))
    }
}

fn unresolved(name: Name) -> EnvError {
    tracing::debug!(?name, "unresolved identifier");
    EnvError::unresolved(name)
}

impl<V> Clone for ScopeRef<V> {
    #[inline]
    fn clone(&self) -> Self {
        ScopeRef(Rc::clone(&self.0))
    }
}

impl<V> fmt::Debug for ScopeRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ScopeRef");
        match self.0.try_borrow() {
            Ok(scope) => s
                .field("kind", &scope.kind)
                .field("depth", &scope.depth)
                .field("locals", &scope.bindings.len())
                .finish(),
            Err(_) => s.finish_non_exhaustive(),
        }
    }
}

/// Non-owning handle to a scope.
///
/// Upgrading succeeds while any construct, child scope or closure still holds
/// the scope.
pub struct WeakScopeRef<V>(Weak<RefCell<Scope<V>>>);

impl<V> WeakScopeRef<V> {
    pub fn upgrade(&self) -> Option<ScopeRef<V>> {
        self.0.upgrade().map(ScopeRef)
    }

    /// `true` while the scope is reachable from some holder.
    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl<V> Clone for WeakScopeRef<V> {
    fn clone(&self) -> Self {
        WeakScopeRef(Weak::clone(&self.0))
    }
}

impl<V> fmt::Debug for WeakScopeRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakScopeRef")
            .field("live", &self.is_live())
            .finish()
    }
}
