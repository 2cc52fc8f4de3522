//! Property-based tests for chain resolution.
//!
//! Random declare/assign sequences are applied both to a real scope chain
//! and to a plain model (one map per chain level), then every lookup from
//! every level is compared against innermost-latest-wins resolution in the
//! model.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::disallowed_types,
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use lexenv_env::{EnvError, Name, ScopeKind, ScopeRef};
use lexenv_ir::StringInterner;
use proptest::prelude::*;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
enum Op {
    Declare { level: usize, name: usize, value: i32 },
    Assign { level: usize, name: usize, value: i32 },
}

const NAMES: usize = 4;

fn op_strategy(depth: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..depth, 0..NAMES, any::<i32>())
            .prop_map(|(level, name, value)| Op::Declare { level, name, value }),
        (0..depth, 0..NAMES, any::<i32>())
            .prop_map(|(level, name, value)| Op::Assign { level, name, value }),
    ]
}

fn chain_and_ops() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (1usize..6).prop_flat_map(|depth| (Just(depth), prop::collection::vec(op_strategy(depth), 0..40)))
}

/// Innermost level at or above `level` whose map binds `name`.
fn model_owner(model: &[FxHashMap<usize, i32>], level: usize, name: usize) -> Option<usize> {
    (0..=level).rev().find(|l| model[*l].contains_key(&name))
}

fn build_chain(depth: usize) -> Vec<ScopeRef<i32>> {
    let mut chain = vec![ScopeRef::root()];
    for _ in 1..depth {
        let child = ScopeRef::child(chain.last().unwrap(), ScopeKind::Block);
        chain.push(child);
    }
    chain
}

proptest! {
    #[test]
    fn lookup_matches_innermost_latest_model((depth, ops) in chain_and_ops()) {
        let interner = StringInterner::new();
        let names: Vec<Name> = (0..NAMES).map(|i| interner.intern(&format!("n{}", i))).collect();
        let chain = build_chain(depth);
        let mut model: Vec<FxHashMap<usize, i32>> = vec![FxHashMap::default(); depth];

        for op in &ops {
            match *op {
                Op::Declare { level, name, value } => {
                    chain[level].declare(names[name], value).unwrap();
                    model[level].insert(name, value);
                }
                Op::Assign { level, name, value } => {
                    let result = chain[level].assign(names[name], value);
                    match model_owner(&model, level, name) {
                        Some(owner) => {
                            prop_assert_eq!(result, Ok(()));
                            model[owner].insert(name, value);
                        }
                        None => {
                            prop_assert_eq!(result, Err(EnvError::unresolved(names[name])));
                        }
                    }
                }
            }
        }

        for (level, scope) in chain.iter().enumerate() {
            prop_assert_eq!(scope.local_len(), model[level].len());
            for (idx, name) in names.iter().enumerate() {
                let expected = model_owner(&model, level, idx)
                    .map(|owner| model[owner][&idx])
                    .ok_or(EnvError::unresolved(*name));
                prop_assert_eq!(scope.lookup(*name), expected);
            }
        }
    }

    #[test]
    fn failed_assign_never_adds_bindings(depth in 1usize..6, value in any::<i32>()) {
        let interner = StringInterner::new();
        let ghost = interner.intern("ghost");
        let chain = build_chain(depth);

        for scope in &chain {
            prop_assert_eq!(scope.assign(ghost, value), Err(EnvError::unresolved(ghost)));
        }
        for scope in &chain {
            prop_assert_eq!(scope.local_len(), 0);
        }
    }
}
