//! Scope chain dumps for `lexenv run --dump`.

use std::fmt;

use lexenv_env::{ScopeRef, WeakScopeRef};
use lexenv_ir::StringLookup;

use crate::value::Value;

/// Render one scope as `kind@depth [a, b]` with names in sorted order.
pub fn render_scope<L: StringLookup + ?Sized>(scope: &ScopeRef<Value>, names: &L) -> String {
    let mut locals: Vec<&str> = scope
        .local_names()
        .into_iter()
        .map(|name| names.lookup(name))
        .collect();
    locals.sort_unstable();
    format!("{}@{} [{}]", scope.kind(), scope.depth(), locals.join(", "))
}

/// Render a scope and every ancestor, innermost first.
pub fn render_chain<L: StringLookup + ?Sized>(scope: &ScopeRef<Value>, names: &L) -> Vec<String> {
    let mut lines = Vec::with_capacity(scope.depth() + 1);
    let mut current = Some(scope.clone());
    while let Some(scope) = current {
        lines.push(render_scope(&scope, names));
        current = scope.parent();
    }
    lines
}

/// State of a watched scope when a scenario ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeSnapshot {
    pub label: String,
    /// Rendered chain, or `None` once every holder has released the scope.
    pub chain: Option<Vec<String>>,
}

impl ScopeSnapshot {
    pub fn capture<L: StringLookup + ?Sized>(
        label: &str,
        scope: &WeakScopeRef<Value>,
        names: &L,
    ) -> Self {
        ScopeSnapshot {
            label: label.to_owned(),
            chain: scope.upgrade().map(|scope| render_chain(&scope, names)),
        }
    }

    pub fn is_live(&self) -> bool {
        self.chain.is_some()
    }
}

impl fmt::Display for ScopeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.chain {
            None => write!(f, "{}: released", self.label),
            Some(chain) => {
                write!(f, "{}: live", self.label)?;
                for line in chain {
                    write!(f, "\n    {line}")?;
                }
                Ok(())
            }
        }
    }
}
