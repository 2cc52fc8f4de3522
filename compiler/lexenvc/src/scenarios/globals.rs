use lexenv_env::Environment;

use crate::host::{function, HostError, HostResult};
use crate::session::Session;
use crate::value::Value;

pub(super) fn run(session: &mut Session) -> HostResult<()> {
    let global_var = session.name("globalVar")?;
    let add = session.name("add")?;
    let a = session.name("a")?;
    let b = session.name("b")?;
    let sum = session.name("sum")?;
    let result = session.name("result")?;
    let result2 = session.name("result2")?;

    let mut program: Environment<Value> = Environment::new();
    program.define_global(global_var, Value::Int(10))?;

    let add_fn = function(program.capture(), &[a, b], move |frame| {
        let total = frame
            .lookup(a)?
            .as_int()?
            .checked_add(frame.lookup(b)?.as_int()?)
            .ok_or(HostError::Overflow { op: "+" })?;
        frame.declare(sum, Value::Int(total))?;
        Ok(frame.lookup(sum)?)
    });
    program.define_global(add, add_fn)?;

    // func main()
    let mut main = program.child();
    let add_value = main.lookup(add)?;

    let value = add_value.call(&[Value::Int(5), Value::Int(15)])?;
    main.define(result, value)?;
    let value = add_value.call(&[main.lookup(global_var)?, Value::Int(10)])?;
    main.define(result2, value)?;

    session.emit_lookup("Result2", main.lookup(result2));
    session.emit_lookup("Result", main.lookup(result));
    session.emit_lookup("sum (in main)", main.lookup(sum));

    // Globals are shared: main's assignment is what add sees next.
    main.assign(global_var, Value::Int(11))?;
    let value = add_value.call(&[main.lookup(global_var)?, Value::Int(0)])?;
    session.emit("add(globalVar, 0)", &value);
    session.emit_lookup("globalVar (package)", program.lookup(global_var));
    session.snapshot("main", main.current());
    Ok(())
}
