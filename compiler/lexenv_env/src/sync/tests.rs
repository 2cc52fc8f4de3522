use super::*;
use lexenv_ir::SharedInterner;
use pretty_assertions::assert_eq;
use rayon::prelude::*;

#[test]
fn test_sync_shadowing_and_fallback() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");
    let y = interner.intern("y");

    let root = SyncScopeRef::root();
    root.declare(x, 1).unwrap();
    root.declare(y, 10).unwrap();
    let child = SyncScopeRef::child(&root, ScopeKind::Block);
    child.declare(x, 2).unwrap();

    assert_eq!(child.lookup(x), Ok(2));
    assert_eq!(child.lookup(y), Ok(10));
    assert_eq!(root.lookup(x), Ok(1));
    assert_eq!(child.depth(), 1);
    assert!(child.parent().unwrap().ptr_eq(&root));
}

#[test]
fn test_sync_assign_undeclared_fails() {
    let interner = SharedInterner::default();
    let z = interner.intern("z");

    let scope: SyncScopeRef<i64> = SyncScopeRef::root();
    assert_eq!(scope.assign(z, 5), Err(EnvError::unresolved(z)));
    assert_eq!(scope.local_len(), 0);
    assert!(!scope.contains_local(z));
}

#[test]
fn test_sync_redeclare_pins_old_binding() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");

    let scope = SyncScopeRef::root();
    let old = scope.declare(x, 1).unwrap();
    let new = scope.declare(x, 2).unwrap();

    assert!(!old.ptr_eq(&new));
    assert_eq!(old.get(), 1);
    assert_eq!(old.name(), x);
    assert!(old.declared_scope().unwrap().ptr_eq(&scope));
    assert_eq!(scope.lookup(x), Ok(2));
}

#[test]
fn test_sync_closure_counter_across_threads() {
    let interner = SharedInterner::default();
    let counter = interner.intern("counter");

    let root: SyncScopeRef<u64> = SyncScopeRef::root();
    root.declare(counter, 0).unwrap();
    let child = SyncScopeRef::child(&root, ScopeKind::Block);

    let increment = SyncClosure::new(child.capture(), move |frame, _| {
        let binding = frame.resolve(counter)?;
        Ok(binding.update(|n| {
            *n += 1;
            *n
        }))
    });

    (0..8).into_par_iter().for_each(|_| {
        for _ in 0..1_000 {
            increment.call(&[]).unwrap();
        }
    });

    assert_eq!(root.lookup(counter), Ok(8_000));
}

#[test]
fn test_sync_concurrent_declares_into_one_scope() {
    let interner = SharedInterner::default();
    let names: Vec<Name> = (0..256).map(|i| interner.intern(&format!("v{i}"))).collect();

    let scope: SyncScopeRef<usize> = SyncScopeRef::root();
    let env = scope.capture();
    names.par_iter().enumerate().for_each(|(i, name)| {
        env.declare(*name, i).unwrap();
    });

    assert_eq!(scope.local_len(), 256);
    for (i, name) in names.iter().enumerate() {
        assert_eq!(env.lookup(*name), Ok(i));
    }
}

#[test]
fn test_sync_closure_keeps_scope_alive_on_other_thread() {
    let interner = SharedInterner::default();
    let name = interner.intern("name");

    let greet = {
        let frame: SyncScopeRef<String> = SyncScopeRef::root();
        frame.declare(name, "GoLang".to_string()).unwrap();
        SyncClosure::new(frame.capture(), move |scope, _| {
            Ok(format!("Hello, {}", scope.lookup(name)?))
        })
    };

    let handle = std::thread::spawn({
        let greet = greet.clone();
        move || greet.call(&[])
    });

    assert_eq!(handle.join().unwrap(), Ok("Hello, GoLang".to_string()));
    assert_eq!(greet.env().lookup(name), Ok("GoLang".to_string()));
}

#[test]
fn test_sync_env_assign_visible_to_closure() {
    let interner = SharedInterner::default();
    let y = interner.intern("y");

    let scope: SyncScopeRef<i32> = SyncScopeRef::root();
    let read = SyncClosure::new(scope.capture(), move |frame, _| frame.lookup(y));

    scope.declare(y, 1).unwrap();
    read.env().assign(y, 2).unwrap();

    assert_eq!(read.call(&[]), Ok(2));
    assert!(read.env().resolve(y).is_ok());
    assert_eq!(read.env().scope().kind(), ScopeKind::Global);
}
