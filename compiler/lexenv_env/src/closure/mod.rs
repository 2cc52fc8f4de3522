//! Captured environments and closures.
//!
//! A closure holds its creation scope by reference, never a copy of the
//! bindings, so it observes every later declare/assign on that chain and
//! keeps the chain alive after the creating construct has exited.

// Rc is the implementation of the shared closure body
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of Closure<V>"
)]

use std::fmt;
use std::rc::Rc;

use lexenv_ir::Name;

use crate::binding::BindingRef;
use crate::errors::{EnvError, EnvResult};
use crate::scope::{ScopeKind, ScopeRef};

/// A scope captured for a closure.
///
/// Holding an `EnvRef` keeps the captured scope and every ancestor alive.
/// All operations go through to the live scope.
pub struct EnvRef<V>(ScopeRef<V>);

impl<V> EnvRef<V> {
    pub(crate) fn new(scope: ScopeRef<V>) -> Self {
        EnvRef(scope)
    }

    /// The captured scope.
    pub fn scope(&self) -> &ScopeRef<V> {
        &self.0
    }

    pub fn declare(&self, name: Name, value: V) -> EnvResult<BindingRef<V>> {
        self.0.declare(name, value)
    }

    pub fn resolve(&self, name: Name) -> EnvResult<BindingRef<V>> {
        self.0.resolve(name)
    }

    pub fn assign(&self, name: Name, value: V) -> EnvResult<()> {
        self.0.assign(name, value)
    }

    pub fn ptr_eq(&self, other: &EnvRef<V>) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl<V: Clone> EnvRef<V> {
    pub fn lookup(&self, name: Name) -> EnvResult<V> {
        self.0.lookup(name)
    }
}

impl<V> Clone for EnvRef<V> {
    fn clone(&self) -> Self {
        EnvRef(self.0.clone())
    }
}

impl<V> fmt::Debug for EnvRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnvRef").field(&self.0).finish()
    }
}

/// Closure body: the fresh invocation scope and the call arguments.
type Body<V, E> = dyn Fn(&ScopeRef<V>, &[V]) -> Result<V, E>;

/// A callable paired with the scope live at its creation.
///
/// `E` is the body's error type. Hosts whose bodies can fail for their own
/// reasons (type errors, arity) pick an error that wraps [`EnvError`].
/// Clones share both the body and the captured scope.
pub struct Closure<V, E = EnvError> {
    body: Rc<Body<V, E>>,
    env: EnvRef<V>,
}

impl<V> Closure<V> {
    /// Create a closure whose body fails only with engine errors.
    pub fn new<F>(env: EnvRef<V>, body: F) -> Self
    where
        F: Fn(&ScopeRef<V>, &[V]) -> EnvResult<V> + 'static,
    {
        Self::with_error(env, body)
    }
}

impl<V, E> Closure<V, E> {
    /// Create a closure with a host-defined error type.
    pub fn with_error<F>(env: EnvRef<V>, body: F) -> Self
    where
        F: Fn(&ScopeRef<V>, &[V]) -> Result<V, E> + 'static,
    {
        Closure {
            body: Rc::new(body),
            env,
        }
    }

    pub fn env(&self) -> &EnvRef<V> {
        &self.env
    }

    /// Invoke the closure.
    ///
    /// Each call runs in a new [`ScopeKind::Closure`] scope whose parent is
    /// the captured scope. The invocation scope is released on return unless
    /// the body captured it into something that outlives the call.
    #[tracing::instrument(level = "trace", skip_all, fields(args = args.len()))]
    pub fn call(&self, args: &[V]) -> Result<V, E> {
        let frame = ScopeRef::child(self.env.scope(), ScopeKind::Closure);
        (self.body)(&frame, args)
    }

    /// `true` if both closures share a body and a captured scope.
    pub fn ptr_eq(&self, other: &Closure<V, E>) -> bool {
        Rc::ptr_eq(&self.body, &other.body) && self.env.ptr_eq(&other.env)
    }
}

impl<V, E> Clone for Closure<V, E> {
    fn clone(&self) -> Self {
        Closure {
            body: Rc::clone(&self.body),
            env: self.env.clone(),
        }
    }
}

impl<V, E> fmt::Debug for Closure<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}
