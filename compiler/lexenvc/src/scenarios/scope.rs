use lexenv_env::{Environment, ScopeKind};

use crate::host::{function, HostResult};
use crate::session::Session;
use crate::value::Value;

pub(super) fn run(session: &mut Session) -> HostResult<()> {
    let global_var = session.name("globalVar")?;
    let local_var = session.name("localVar")?;
    let block_var = session.name("blockVar")?;
    let loop_var = session.name("loopVar")?;
    let i = session.name("i")?;
    let anon_var = session.name("anonVar")?;
    let closure_var = session.name("closureVar")?;

    let mut program: Environment<Value> = Environment::new();
    program.define_global(global_var, Value::str("I am a global variable"))?;

    // func main()
    let mut main = program.child();
    session.watch("main", main.current());
    main.define(local_var, Value::str("I am a local variable"))?;
    session.emit_lookup("globalVar", main.lookup(global_var));
    session.emit_lookup("localVar", main.lookup(local_var));

    main.with_scope(ScopeKind::Block, |block| -> HostResult<()> {
        block.define(block_var, Value::str("I am a block variable"))?;
        session.emit_lookup("blockVar (inside block)", block.lookup(block_var));
        session.snapshot("inside block", block.current());
        Ok(())
    })?;
    session.emit_lookup("blockVar (after block)", main.lookup(block_var));

    for n in 0..2 {
        let mut iteration = main.scoped(ScopeKind::LoopIteration);
        iteration.define(i, Value::Int(n))?;
        iteration.define(loop_var, Value::str(format!("I am loop variable #{n}")))?;
        session.emit_lookup("loopVar", iteration.lookup(loop_var));
    }
    session.emit_lookup("i (after loop)", main.lookup(i));

    let anon = function(main.capture(), &[], move |frame| {
        frame.declare(anon_var, Value::str("I am an anonymous function variable"))?;
        Ok(frame.lookup(anon_var)?)
    });
    session.emit("anonFunc()", &anon.call(&[])?);
    session.emit_lookup("anonVar (after call)", main.lookup(anon_var));

    main.define(closure_var, Value::str("I am a closure variable"))?;
    let closure = function(main.capture(), &[], move |frame| {
        Ok(frame.lookup(closure_var)?)
    });
    session.emit("closureFunc()", &closure.call(&[])?);
    main.assign(closure_var, Value::str("I was reassigned after capture"))?;
    session.emit("closureFunc() after assign", &closure.call(&[])?);
    session.snapshot("main", main.current());
    Ok(())
}
