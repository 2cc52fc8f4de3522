use lexenv_env::Environment;

use super::int_binop;
use crate::host::{function, HostError, HostResult};
use crate::session::Session;
use crate::value::Value;

pub(super) fn run(session: &mut Session) -> HostResult<()> {
    let op = session.name("op")?;
    let a = session.name("a")?;
    let b = session.name("b")?;
    let f = session.name("f")?;
    let x = session.name("x")?;
    let name = session.name("name")?;
    let value = session.name("value")?;
    let say_hi = session.name("sayHi")?;
    let operations = session.name("operations")?;

    let program: Environment<Value> = Environment::new();
    let package = program.capture();

    let add = int_binop(package.clone(), [a, b], "+", i64::checked_add);
    let subtract = int_binop(package.clone(), [a, b], "-", i64::checked_sub);
    let multiply = int_binop(package.clone(), [a, b], "*", i64::checked_mul);

    let mut main = program.child();

    // var op func(int, int) int
    main.define(op, Value::Unit)?;
    main.assign(op, add.clone())?;
    let sum = main.lookup(op)?.call(&[Value::Int(3), Value::Int(4)])?;
    session.emit("op(3, 4)", &sum);

    let operate = function(package.clone(), &[a, b, f], move |frame| {
        frame
            .lookup(f)?
            .call(&[frame.lookup(a)?, frame.lookup(b)?])
    });
    let sum = operate.call(&[Value::Int(5), Value::Int(3), add.clone()])?;
    session.emit("operate(5, 3, add)", &sum);

    // greeter returns a closure over its own call frame.
    let greeter = function(package.clone(), &[name], move |frame| {
        Ok(function(frame.capture(), &[], move |inner| {
            let who = inner.lookup(name)?;
            Ok(Value::str(format!("Hello, {}", who.as_str()?)))
        }))
    });
    let greet = greeter.call(&[Value::str("GoLang")])?;
    main.define(say_hi, greet)?;
    let hello = main.lookup(say_hi)?;
    session.emit("sayHi()", &hello.call(&[])?);
    session.emit_lookup("name (in main)", main.lookup(name));
    session.snapshot("sayHi captured", hello.as_func()?.env().scope());

    main.define(operations, Value::List(vec![add.clone(), subtract]))?;
    let table = main.lookup(operations)?;
    let results = (0..2)
        .map(|index| {
            table
                .index(index)?
                .call(&[Value::Int(10), Value::Int(5)])
        })
        .collect::<HostResult<Vec<_>>>()?;
    session.emit("operations(10, 5)", &Value::List(results));

    let square = function(package.clone(), &[x], move |frame| {
        let n = frame.lookup(x)?.as_int()?;
        n.checked_mul(n)
            .map(Value::Int)
            .ok_or(HostError::Overflow { op: "*" })
    });
    let apply = function(package.clone(), &[f, value], move |frame| {
        frame.lookup(f)?.call(&[frame.lookup(value)?])
    });
    session.emit("apply(square, 4)", &apply.call(&[square, Value::Int(4)])?);

    let apply_op = function(package, &[a, b, op], move |frame| {
        frame
            .lookup(op)?
            .call(&[frame.lookup(a)?, frame.lookup(b)?])
    });
    let product = apply_op.call(&[Value::Int(3), Value::Int(4), multiply])?;
    session.emit("applyOp(3, 4, multiply)", &product);

    // Calling a non-function fails with a host error.
    let not_callable = main.lookup(operations)?.call(&[]);
    if let Err(err) = not_callable {
        session.emit("operations()", &Value::str(format!("<{err}>")));
    }
    Ok(())
}
