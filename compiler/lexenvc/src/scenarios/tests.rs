use super::*;
use crate::dump::ScopeSnapshot;
use pretty_assertions::assert_eq;

fn run(name: &str) -> Report {
    let Some(scenario) = find(name) else {
        panic!("no scenario named {name}");
    };
    let report = scenario.run();
    assert_eq!(report.error, None, "scenario {name} failed");
    report
}

fn live(label: &str, chain: &[&str]) -> ScopeSnapshot {
    ScopeSnapshot {
        label: label.to_owned(),
        chain: Some(chain.iter().map(|line| (*line).to_owned()).collect()),
    }
}

fn released(label: &str) -> ScopeSnapshot {
    ScopeSnapshot {
        label: label.to_owned(),
        chain: None,
    }
}

#[test]
fn test_registry_names_are_unique() {
    let mut names: Vec<_> = SCENARIOS.iter().map(|s| s.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), SCENARIOS.len());
    assert!(find("scope").is_some());
    assert!(find("nope").is_none());
}

#[test]
fn test_scope() {
    let report = run("scope");
    assert_eq!(
        report.transcript,
        vec![
            "globalVar: I am a global variable",
            "localVar: I am a local variable",
            "blockVar (inside block): I am a block variable",
            "blockVar (after block): <unresolved identifier `blockVar`>",
            "loopVar: I am loop variable #0",
            "loopVar: I am loop variable #1",
            "i (after loop): <unresolved identifier `i`>",
            "anonFunc(): I am an anonymous function variable",
            "anonVar (after call): <unresolved identifier `anonVar`>",
            "closureFunc(): I am a closure variable",
            "closureFunc() after assign: I was reassigned after capture",
        ]
    );
    assert_eq!(
        report.scopes,
        vec![
            live(
                "inside block",
                &["block@2 [blockVar]", "function@1 [localVar]", "global@0 [globalVar]"]
            ),
            live(
                "main",
                &["function@1 [closureVar, localVar]", "global@0 [globalVar]"]
            ),
            released("main"),
        ]
    );
}

#[test]
fn test_shadowing() {
    let report = run("shadowing");
    assert_eq!(
        report.transcript,
        vec![
            "x: 10",
            "x (redeclared): 20",
            "first binding: 10",
            "x (inner block): 30",
            "x (inner block, assigned): 31",
            "x (outer): 20",
            "x (outer, after inner assign): 40",
            "first binding: 10",
        ]
    );
    assert_eq!(
        report.scopes,
        vec![live(
            "inner block",
            &["block@2 [x]", "function@1 [x]", "global@0 []"]
        )]
    );
}

#[test]
fn test_globals() {
    let report = run("globals");
    assert_eq!(
        report.transcript,
        vec![
            "Result2: 20",
            "Result: 20",
            "sum (in main): <unresolved identifier `sum`>",
            "add(globalVar, 0): 11",
            "globalVar (package): 11",
        ]
    );
    assert_eq!(
        report.scopes,
        vec![live(
            "main",
            &["function@1 [result, result2]", "global@0 [add, globalVar]"]
        )]
    );
}

#[test]
fn test_functions() {
    let report = run("functions");
    assert_eq!(
        report.transcript,
        vec![
            "op(3, 4): 7",
            "operate(5, 3, add): 8",
            "sayHi(): Hello, GoLang",
            "name (in main): <unresolved identifier `name`>",
            "operations(10, 5): [15, 5]",
            "apply(square, 4): 16",
            "applyOp(3, 4, multiply): 12",
            "operations(): <value of type `list` is not callable>",
        ]
    );
    assert_eq!(
        report.scopes,
        vec![live("sayHi captured", &["closure@1 [name]", "global@0 []"])]
    );
}

#[test]
fn test_counter() {
    let report = run("counter");
    assert_eq!(
        report.transcript,
        vec![
            "increment(): 1",
            "increment(): 2",
            "increment(): 3",
            "counter (root): 3",
            "first(): 1",
            "first(): 2",
            "second(): 1",
            "count (root): <unresolved identifier `count`>",
        ]
    );
    assert_eq!(
        report.scopes,
        vec![
            live("child", &["block@1 []", "global@0 [counter]"]),
            released("first counter frame"),
        ]
    );
}

#[test]
fn test_loop_capture() {
    let report = run("loop-capture");
    assert_eq!(
        report.transcript,
        vec![
            "per-iteration i: [0, 1, 2]",
            "i (after loop): <unresolved identifier `i`>",
            "shared i: [3, 3, 3]",
            "uncaptured iteration: released",
            "iteration 1 (closure alive): live",
            "iteration 1 (closures dropped): released",
        ]
    );
}

#[test]
fn test_int_binop_reports_overflow() {
    let session = Session::new();
    let a = session.name("a").unwrap();
    let b = session.name("b").unwrap();
    let scope = lexenv_env::ScopeRef::root();

    let add = int_binop(scope.capture(), [a, b], "+", i64::checked_add);
    assert_eq!(
        add.call(&[Value::Int(i64::MAX), Value::Int(1)]),
        Err(HostError::Overflow { op: "+" })
    );
    assert_eq!(
        add.call(&[Value::Int(1), Value::str("x")]),
        Err(HostError::TypeMismatch {
            expected: "int",
            found: "str"
        })
    );
}
