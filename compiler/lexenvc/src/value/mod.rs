//! Dynamic values stored in bindings.

use std::fmt;

use lexenv_env::Closure;

use crate::host::{HostError, HostResult};

/// Function value: an engine closure whose body can raise host errors.
pub type Func = Closure<Value, HostError>;

#[derive(Clone, Debug)]
pub enum Value {
    Unit,
    Int(i64),
    Str(String),
    Func(Func),
    List(Vec<Value>),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Func(_) => "func",
            Value::List(_) => "list",
        }
    }

    pub fn as_int(&self) -> HostResult<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(other.mismatch("int")),
        }
    }

    pub fn as_str(&self) -> HostResult<&str> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(other.mismatch("str")),
        }
    }

    pub fn as_func(&self) -> HostResult<&Func> {
        match self {
            Value::Func(f) => Ok(f),
            other => Err(HostError::NotCallable {
                found: other.type_name(),
            }),
        }
    }

    /// Element `index` of a list value.
    pub fn index(&self, index: usize) -> HostResult<&Value> {
        match self {
            Value::List(items) => items.get(index).ok_or(HostError::IndexOutOfBounds {
                index,
                len: items.len(),
            }),
            other => Err(other.mismatch("list")),
        }
    }

    /// Call a function value.
    pub fn call(&self, args: &[Value]) -> HostResult<Value> {
        self.as_func()?.call(args)
    }

    fn mismatch(&self, expected: &'static str) -> HostError {
        HostError::TypeMismatch {
            expected,
            found: self.type_name(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            // Functions compare by identity.
            (Value::Func(a), Value::Func(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.write_str("()"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Func(_) => f.write_str("<func>"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}
