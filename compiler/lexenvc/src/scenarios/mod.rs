//! Walkthrough scenarios.
//!
//! Each scenario drives the engine through one family of scoping shapes and
//! records what a program printing its variables would print. Scenarios run
//! in isolation: every run gets its own [`Session`] and interner.

mod counter;
mod functions;
mod globals;
mod loop_capture;
mod scope;
mod shadowing;

use lexenv_env::{EnvRef, Name};

use crate::host::{function, HostError, HostResult};
use crate::session::{Report, Session};
use crate::value::Value;

/// A named, runnable walkthrough.
pub struct Scenario {
    pub name: &'static str,
    pub summary: &'static str,
    run: fn(&mut Session) -> HostResult<()>,
}

impl Scenario {
    /// Run in a fresh session.
    #[tracing::instrument(level = "debug", skip_all, fields(scenario = self.name))]
    pub fn run(&self) -> Report {
        let mut session = Session::new();
        let result = (self.run)(&mut session);
        if let Err(err) = &result {
            tracing::debug!(error = %err.render(session.interner()), "scenario failed");
        }
        session.finish(self.name, result)
    }
}

pub static SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "scope",
        summary: "global, function, block, loop, anonymous-function and closure scopes",
        run: scope::run,
    },
    Scenario {
        name: "shadowing",
        summary: "redeclaration in one scope and shadowing from an inner block",
        run: shadowing::run,
    },
    Scenario {
        name: "globals",
        summary: "functions reading package globals and their own parameters",
        run: globals::run,
    },
    Scenario {
        name: "functions",
        summary: "function values, higher-order calls and returned closures",
        run: functions::run,
    },
    Scenario {
        name: "counter",
        summary: "a closure assigning through its captured chain",
        run: counter::run,
    },
    Scenario {
        name: "loop-capture",
        summary: "closures created in loops, per-iteration and shared variables",
        run: loop_capture::run,
    },
];

/// Look up a scenario by name.
pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|scenario| scenario.name == name)
}

/// Two-parameter integer function; `None` from `apply` reports overflow.
fn int_binop(
    env: EnvRef<Value>,
    params: [Name; 2],
    op: &'static str,
    apply: fn(i64, i64) -> Option<i64>,
) -> Value {
    let [a, b] = params;
    function(env, &params, move |frame| {
        let lhs = frame.lookup(a)?.as_int()?;
        let rhs = frame.lookup(b)?.as_int()?;
        apply(lhs, rhs)
            .map(Value::Int)
            .ok_or(HostError::Overflow { op })
    })
}

#[cfg(test)]
mod tests;
