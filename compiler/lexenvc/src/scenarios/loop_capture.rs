use lexenv_env::{Environment, ScopeKind, WeakScopeRef};

use crate::host::{function, HostResult};
use crate::session::Session;
use crate::value::Value;

fn liveness(live: bool) -> Value {
    Value::str(if live { "live" } else { "released" })
}

pub(super) fn run(session: &mut Session) -> HostResult<()> {
    let i = session.name("i")?;

    let program: Environment<Value> = Environment::new();
    let mut main = program.child();

    // for i := 0; i < 3; i++ with a fresh i per iteration
    let mut per_iteration = Vec::new();
    let mut held = None;
    for n in 0..3 {
        let mut iteration = main.scoped(ScopeKind::LoopIteration);
        iteration.define(i, Value::Int(n))?;
        if n == 1 {
            held = Some(iteration.current().downgrade());
        }
        let read = function(iteration.capture(), &[], move |frame| Ok(frame.lookup(i)?));
        per_iteration.push(read);
    }
    let seen = per_iteration
        .iter()
        .map(|read| read.call(&[]))
        .collect::<HostResult<Vec<_>>>()?;
    session.emit("per-iteration i", &Value::List(seen));
    session.emit_lookup("i (after loop)", main.lookup(i));

    // One i declared outside the loop body and shared by every closure.
    let mut shared = Vec::new();
    main.with_scope(ScopeKind::Block, |block| -> HostResult<()> {
        block.define(i, Value::Int(0))?;
        for n in 0..3 {
            block.assign(i, Value::Int(n))?;
            let read = function(block.capture(), &[], move |frame| Ok(frame.lookup(i)?));
            shared.push(read);
        }
        block.assign(i, Value::Int(3))?;
        Ok(())
    })?;
    let seen = shared
        .iter()
        .map(|read| read.call(&[]))
        .collect::<HostResult<Vec<_>>>()?;
    session.emit("shared i", &Value::List(seen));

    let iteration = main.scoped(ScopeKind::LoopIteration);
    let uncaptured = iteration.current().downgrade();
    drop(iteration);
    session.emit("uncaptured iteration", &liveness(uncaptured.is_live()));

    let held_live = held.as_ref().is_some_and(WeakScopeRef::is_live);
    session.emit("iteration 1 (closure alive)", &liveness(held_live));
    drop(per_iteration);
    let held_live = held.as_ref().is_some_and(WeakScopeRef::is_live);
    session.emit("iteration 1 (closures dropped)", &liveness(held_live));
    Ok(())
}
