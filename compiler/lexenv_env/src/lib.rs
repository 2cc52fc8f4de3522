//! Lexenv Env - the lexical environment engine.
//!
//! Scopes form a chain through their parent links. Identifiers resolve
//! innermost-first along that chain, declarations shadow, assignments mutate
//! the binding they resolve to, and closures keep the scope they were created
//! in alive for as long as they exist.
//!
//! # Architecture
//!
//! - [`ScopeRef`]: shared handle to one scope; `declare` / `lookup` / `assign` / `capture`
//! - [`BindingRef`]: shared handle to one binding object (identity survives redeclaration)
//! - [`EnvRef`] and [`Closure`]: a captured scope, and a callable bundled with one
//! - [`Environment`]: scope-stack driver for embedding programs, with the RAII [`ScopeGuard`]
//! - [`sync`]: the same model behind `Arc` + `RwLock` for closures run on several threads
//!
//! The value payload `V` is opaque: the engine only moves and clones it.

mod binding;
mod closure;
mod environment;
mod errors;
mod scope;
mod stack;
pub mod sync;

pub use binding::BindingRef;
pub use closure::{Closure, EnvRef};
pub use environment::{Environment, ScopeGuard};
pub use errors::{EnvError, EnvResult, Resource};
pub use lexenv_ir::Name;
pub use scope::{ScopeKind, ScopeRef, WeakScopeRef};
