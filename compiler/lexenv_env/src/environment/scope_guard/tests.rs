use crate::environment::Environment;
use crate::errors::EnvResult;
use crate::scope::ScopeKind;
use lexenv_ir::{Name, SharedInterner};
use pretty_assertions::assert_eq;

#[test]
fn test_guard_pops_on_drop() {
    let interner = SharedInterner::default();
    let block_var = interner.intern("blockVar");

    let mut env: Environment<&str> = Environment::new();
    {
        let mut block = env.scoped(ScopeKind::Block);
        block.define(block_var, "I am a block variable").unwrap();
        assert_eq!(block.lookup(block_var), Ok("I am a block variable"));
        assert_eq!(block.depth(), 2);
    }

    assert_eq!(env.depth(), 1);
    assert!(env.lookup(block_var).is_err());
}

#[test]
fn test_guard_restores_height_after_unbalanced_pushes() {
    let mut env: Environment<i32> = Environment::new();
    {
        let mut block = env.scoped(ScopeKind::Block);
        block.push_scope(ScopeKind::Block);
        block.push_scope(ScopeKind::LoopIteration);
        assert_eq!(block.depth(), 4);
    }
    assert_eq!(env.depth(), 1);
}

fn define_then_read(env: &mut Environment<i32>, x: Name, missing: Name) -> EnvResult<i32> {
    let mut scoped = env.scoped(ScopeKind::Block);
    scoped.define(x, 1)?;
    scoped.lookup(missing)
}

#[test]
fn test_guard_pops_on_early_return() {
    let interner = SharedInterner::default();
    let x = interner.intern("x");
    let missing = interner.intern("missing");

    let mut env = Environment::new();
    assert!(define_then_read(&mut env, x, missing).is_err());
    assert_eq!(env.depth(), 1);
}

#[test]
fn test_guard_pops_on_panic() {
    let mut env: Environment<i32> = Environment::new();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _scoped = env.scoped(ScopeKind::Block);
        panic!("block body failed");
    }));

    assert!(result.is_err());
    assert_eq!(env.depth(), 1);
}

#[test]
fn test_with_scope_returns_body_result() {
    let interner = SharedInterner::default();
    let loop_var = interner.intern("loopVar");

    let mut env: Environment<i32> = Environment::new();
    let seen = env.with_scope(ScopeKind::LoopIteration, |scoped| -> EnvResult<i32> {
        scoped.define(loop_var, 5)?;
        scoped.lookup(loop_var)
    });

    assert_eq!(seen, Ok(5));
    assert_eq!(env.depth(), 1);
    assert!(env.lookup(loop_var).is_err());
}
