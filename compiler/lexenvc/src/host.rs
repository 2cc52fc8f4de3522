//! Host-side errors and function values.

use lexenv_env::{Closure, EnvError, EnvRef, Name, ScopeRef};
use lexenv_ir::StringLookup;

use crate::value::Value;

/// Errors raised while running host code on top of the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Resolution or allocation failure reported by the engine.
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error("value of type `{found}` is not callable")]
    NotCallable { found: &'static str },
    #[error("expected `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("function takes {expected} argument(s) but {found} were supplied")]
    Arity { expected: usize, found: usize },
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("integer overflow in `{op}`")]
    Overflow { op: &'static str },
}

impl HostError {
    /// Message with identifier text filled in.
    pub fn render<L: StringLookup + ?Sized>(&self, names: &L) -> String {
        match self {
            HostError::Env(err) => err.render(names),
            other => other.to_string(),
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;

/// Build a function value that closes over `env`.
///
/// Each call checks arity, declares `params` in the fresh invocation scope
/// from the arguments, then runs `body` against that scope.
pub fn function<F>(env: EnvRef<Value>, params: &[Name], body: F) -> Value
where
    F: Fn(&ScopeRef<Value>) -> HostResult<Value> + 'static,
{
    let params = params.to_vec();
    Value::Func(Closure::with_error(env, move |frame, args| {
        if args.len() != params.len() {
            return Err(HostError::Arity {
                expected: params.len(),
                found: args.len(),
            });
        }
        for (param, arg) in params.iter().zip(args) {
            frame.declare(*param, arg.clone())?;
        }
        body(frame)
    }))
}
