use lexenv_env::{Environment, ScopeKind};

use crate::host::HostResult;
use crate::session::Session;
use crate::value::Value;

pub(super) fn run(session: &mut Session) -> HostResult<()> {
    let x = session.name("x")?;

    let program: Environment<Value> = Environment::new();
    let mut main = program.child();

    let first = main.define(x, Value::Int(10))?;
    session.emit_lookup("x", main.lookup(x));

    // Redeclaring in the same scope replaces the visible binding only.
    main.define(x, Value::Int(20))?;
    session.emit_lookup("x (redeclared)", main.lookup(x));
    session.emit("first binding", &first.get());

    main.with_scope(ScopeKind::Block, |block| -> HostResult<()> {
        block.define(x, Value::Int(30))?;
        session.emit_lookup("x (inner block)", block.lookup(x));
        block.assign(x, Value::Int(31))?;
        session.emit_lookup("x (inner block, assigned)", block.lookup(x));
        session.snapshot("inner block", block.current());
        Ok(())
    })?;
    session.emit_lookup("x (outer)", main.lookup(x));

    main.with_scope(ScopeKind::Block, |block| block.assign(x, Value::Int(40)))?;
    session.emit_lookup("x (outer, after inner assign)", main.lookup(x));
    session.emit("first binding", &first.get());
    Ok(())
}
