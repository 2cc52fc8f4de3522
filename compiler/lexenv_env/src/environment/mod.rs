//! Scope-stack driver for embedding programs.
//!
//! An embedding program walks its own control flow; this type tracks which
//! scope is current as it enters and leaves constructs. The bottom of the
//! stack is the frame the environment was started in (the global root for
//! [`Environment::new`]); it is never popped.

mod scope_guard;

use lexenv_ir::Name;

use crate::binding::BindingRef;
use crate::closure::EnvRef;
use crate::errors::EnvResult;
use crate::scope::{ScopeKind, ScopeRef};

pub use scope_guard::ScopeGuard;

/// Stack of live scopes with the current scope on top.
pub struct Environment<V> {
    /// Active constructs, innermost last. Never empty.
    scopes: Vec<ScopeRef<V>>,
    /// Root of the chain; package-level variables live here.
    global: ScopeRef<V>,
}

impl<V> Environment<V> {
    /// Create an environment with a fresh global root.
    pub fn new() -> Self {
        let global = ScopeRef::root();
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// Start a call frame under a captured scope.
    ///
    /// The bottom of the new stack is a `kind` scope whose parent is the
    /// captured one, so declarations in the frame never leak into it.
    pub fn enter(captured: &EnvRef<V>, kind: ScopeKind) -> Self {
        let frame = ScopeRef::child(captured.scope(), kind);
        Environment {
            global: captured.scope().global(),
            scopes: vec![frame],
        }
    }

    /// Create an environment for a function call.
    ///
    /// Shares the global root but starts its own stack with a
    /// [`ScopeKind::Function`] frame, so the caller's locals are not visible.
    #[must_use]
    pub fn child(&self) -> Self {
        let frame = ScopeRef::child(&self.global, ScopeKind::Function);
        Environment {
            global: self.global.clone(),
            scopes: vec![frame],
        }
    }

    /// Number of scopes on the stack.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Enter a construct: push a new scope under the current one.
    #[inline]
    pub fn push_scope(&mut self, kind: ScopeKind) {
        let scope = ScopeRef::child(self.current(), kind);
        self.scopes.push(scope);
    }

    /// Leave the current construct.
    ///
    /// The popped scope is released unless a closure or child scope still
    /// holds it. The bottom frame is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Pop until at most `depth` scopes remain (never below one).
    pub(crate) fn truncate(&mut self, depth: usize) {
        self.scopes.truncate(depth.max(1));
    }

    /// The innermost active scope.
    #[inline]
    pub fn current(&self) -> &ScopeRef<V> {
        self.scopes.last().unwrap_or(&self.global)
    }

    /// The root scope of this environment's chain.
    pub fn global(&self) -> &ScopeRef<V> {
        &self.global
    }

    /// Declare in the current scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: V) -> EnvResult<BindingRef<V>> {
        self.current().declare(name, value)
    }

    /// Declare in the global root.
    pub fn define_global(&mut self, name: Name, value: V) -> EnvResult<BindingRef<V>> {
        self.global.declare(name, value)
    }

    /// Assign through the chain from the current scope.
    #[inline]
    pub fn assign(&mut self, name: Name, value: V) -> EnvResult<()> {
        self.current().assign(name, value)
    }

    pub fn resolve(&self, name: Name) -> EnvResult<BindingRef<V>> {
        self.current().resolve(name)
    }

    /// Capture the current scope for a closure.
    pub fn capture(&self) -> EnvRef<V> {
        self.current().capture()
    }
}

impl<V: Clone> Environment<V> {
    /// Look up through the chain from the current scope.
    #[inline]
    pub fn lookup(&self, name: Name) -> EnvResult<V> {
        self.current().lookup(name)
    }
}

impl<V> Default for Environment<V> {
    fn default() -> Self {
        Self::new()
    }
}
