//! Failure conditions surfaced by the engine.
//!
//! There are exactly two: an identifier that resolves nowhere on the chain,
//! and an allocation the host could not satisfy. Neither is recovered
//! internally and no operation mutates anything before failing.

use std::fmt;

use lexenv_ir::{InternError, Name, StringLookup};

/// What the engine failed to allocate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Room for one more entry in a scope's binding table.
    Binding,
    /// A new interned identifier.
    Identifier,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Binding => "binding slot",
            Resource::Identifier => "identifier",
        })
    }
}

/// Error returned by declare, lookup, assign and closure calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    /// No scope on the chain binds the name.
    #[error("unresolved identifier {name:?}")]
    UnresolvedIdentifier { name: Name },
    /// The host failed to allocate a scope entry or identifier.
    #[error("resource exhausted: could not allocate {resource}")]
    ResourceExhausted { resource: Resource },
}

impl EnvError {
    #[inline]
    pub fn unresolved(name: Name) -> Self {
        EnvError::UnresolvedIdentifier { name }
    }

    /// Message with the identifier text filled in.
    pub fn render<L: StringLookup + ?Sized>(&self, names: &L) -> String {
        match self {
            EnvError::UnresolvedIdentifier { name } => {
                format!("unresolved identifier `{}`", names.lookup(*name))
            }
            EnvError::ResourceExhausted { .. } => self.to_string(),
        }
    }
}

impl From<InternError> for EnvError {
    fn from(_: InternError) -> Self {
        EnvError::ResourceExhausted {
            resource: Resource::Identifier,
        }
    }
}

/// Result alias used throughout the engine.
pub type EnvResult<T> = Result<T, EnvError>;
