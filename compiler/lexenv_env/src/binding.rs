//! Binding objects.

// Rc is the implementation of BindingRef<V>
#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of BindingRef<V>"
)]

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use lexenv_ir::Name;

use crate::scope::{Scope, ScopeRef};

struct Slot<V> {
    name: Name,
    value: RefCell<V>,
    /// Owning scope. Weak: the scope owns the binding, not the other way round.
    scope: Weak<RefCell<Scope<V>>>,
}

/// Shared handle to one binding object.
///
/// The handle pins the binding, not the name: after the owning scope
/// redeclares the name, this handle still reads and writes the old binding.
pub struct BindingRef<V>(Rc<Slot<V>>);

impl<V> BindingRef<V> {
    pub(crate) fn new(name: Name, value: V, scope: Weak<RefCell<Scope<V>>>) -> Self {
        BindingRef(Rc::new(Slot {
            name,
            value: RefCell::new(value),
            scope,
        }))
    }

    pub fn name(&self) -> Name {
        self.0.name
    }

    /// Overwrite the value in place, returning the old one.
    pub fn replace(&self, value: V) -> V {
        self.0.value.replace(value)
    }

    /// Overwrite the value in place.
    pub fn set(&self, value: V) {
        drop(self.replace(value));
    }

    /// The scope that owns this binding, if it is still live.
    pub fn declared_scope(&self) -> Option<ScopeRef<V>> {
        self.0.scope.upgrade().map(ScopeRef::from_rc)
    }

    /// `true` if both handles refer to the same binding object.
    pub fn ptr_eq(&self, other: &BindingRef<V>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<V: Clone> BindingRef<V> {
    /// Clone of the current value.
    pub fn get(&self) -> V {
        self.0.value.borrow().clone()
    }
}

impl<V> Clone for BindingRef<V> {
    #[inline]
    fn clone(&self) -> Self {
        BindingRef(Rc::clone(&self.0))
    }
}

impl<V: fmt::Debug> fmt::Debug for BindingRef<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRef")
            .field("name", &self.0.name)
            .field("value", &self.0.value)
            .finish()
    }
}
