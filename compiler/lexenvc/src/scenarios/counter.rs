use lexenv_env::{Name, ScopeKind, ScopeRef};

use crate::host::{function, HostError, HostResult};
use crate::session::Session;
use crate::value::Value;

fn bump(scope: &ScopeRef<Value>, name: Name) -> HostResult<Value> {
    let next = scope
        .lookup(name)?
        .as_int()?
        .checked_add(1)
        .ok_or(HostError::Overflow { op: "+" })?;
    scope.assign(name, Value::Int(next))?;
    Ok(Value::Int(next))
}

pub(super) fn run(session: &mut Session) -> HostResult<()> {
    let counter = session.name("counter")?;
    let count = session.name("count")?;

    let root: ScopeRef<Value> = ScopeRef::root();
    root.declare(counter, Value::Int(0))?;
    let child = ScopeRef::child(&root, ScopeKind::Block);

    let increment = function(child.capture(), &[], move |frame| bump(frame, counter));
    for _ in 0..3 {
        session.emit("increment()", &increment.call(&[])?);
    }
    session.emit_lookup("counter (root)", root.lookup(counter));
    session.snapshot("child", &child);

    // Each makeCounter() call owns a count that outlives the call.
    let make_counter = function(root.capture(), &[], move |frame| {
        frame.declare(count, Value::Int(0))?;
        Ok(function(frame.capture(), &[], move |inner| bump(inner, count)))
    });
    let first = make_counter.call(&[])?;
    let second = make_counter.call(&[])?;
    session.watch("first counter frame", first.as_func()?.env().scope());

    session.emit("first()", &first.call(&[])?);
    session.emit("first()", &first.call(&[])?);
    session.emit("second()", &second.call(&[])?);
    session.emit_lookup("count (root)", root.lookup(count));
    Ok(())
}
