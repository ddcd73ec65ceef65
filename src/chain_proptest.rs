#![cfg(test)]

// Property tests for Chain kept inside the crate so they can reach the
// sentinel handles and arena directly.

use crate::chain::Chain;
use crate::error::Error;
use crate::node::NodeHandle;
use proptest::prelude::*;
use std::collections::HashMap;
use std::rc::Rc;

// Pool-indexed operations: a pool entry is one `Rc`, so two indices may hold
// equal integers while still being distinct values.
#[derive(Clone, Debug)]
enum Op {
    Append(usize),
    Remove(usize),
    RemoveFirst,
    RemoveLast,
    Contains(usize),
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<i32>, Vec<Op>)> {
    // small value range so equal contents show up in the pool
    proptest::collection::vec(0i32..4, 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => idx.clone().prop_map(Op::Append),
            2 => idx.clone().prop_map(Op::Remove),
            1 => Just(Op::RemoveFirst),
            1 => Just(Op::RemoveLast),
            2 => idx.clone().prop_map(Op::Contains),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_links(c: &Chain<i32>, model: &[usize], pool: &[Rc<i32>]) -> Result<(), TestCaseError> {
    // forward walk matches the model, backward walk is its mirror
    let fwd: Vec<_> = c.iter().collect();
    prop_assert_eq!(fwd.len(), model.len());
    for (v, &i) in fwd.iter().zip(model) {
        prop_assert!(Rc::ptr_eq(v, &pool[i]));
    }
    let back: Vec<_> = c.iter().rev().collect();
    for (v, &i) in back.iter().zip(model.iter().rev()) {
        prop_assert!(Rc::ptr_eq(v, &pool[i]));
    }
    prop_assert_eq!(c.len(), model.len());
    prop_assert_eq!(c.is_empty(), model.is_empty());
    prop_assert_eq!(c.nodes_in_arena(), model.len() + 2);
    Ok(())
}

// Property: state-machine equivalence against a Vec of pool indices.
// Invariants exercised across random operation sequences:
// - Appending an `Rc` already in the chain fails and changes nothing.
// - `first`/`last` are the model's ends; forward and reverse walks agree.
// - `remove` takes out exactly the matching `Rc`; missing values report
//   `ValueNotFound`.
// - Handles of released nodes never resolve again.
// - `len` always equals the number of nodes between the sentinels.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_chain_state_machine((raw, ops) in arb_scenario()) {
        let pool: Vec<Rc<i32>> = raw.into_iter().map(Rc::new).collect();
        let mut sut: Chain<i32> = Chain::new(0);
        let mut model: Vec<usize> = Vec::new();
        let mut live: HashMap<usize, NodeHandle> = HashMap::new();
        let mut stale: Vec<NodeHandle> = Vec::new();

        for op in ops {
            match op {
                Op::Append(i) => {
                    let already = model.contains(&i);
                    match sut.append(Rc::clone(&pool[i])) {
                        Ok(h) => {
                            prop_assert!(!already, "append must fail on duplicate");
                            model.push(i);
                            live.insert(i, h);
                        }
                        Err(Error::DuplicateValue { bucket }) => {
                            prop_assert!(already, "duplicate error only when present");
                            prop_assert_eq!(bucket, 0);
                        }
                        Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                    }
                }
                Op::Remove(i) => {
                    match model.iter().position(|&m| m == i) {
                        Some(pos) => {
                            let v = sut.remove(&pool[i]).expect("present in model");
                            prop_assert!(Rc::ptr_eq(&v, &pool[i]));
                            model.remove(pos);
                            stale.push(live.remove(&i).expect("tracked handle"));
                        }
                        None => {
                            prop_assert_eq!(sut.remove(&pool[i]), Err(Error::ValueNotFound { bucket: 0 }));
                        }
                    }
                }
                Op::RemoveFirst => {
                    let got = sut.remove_first();
                    if model.is_empty() {
                        prop_assert!(got.is_none());
                    } else {
                        let i = model.remove(0);
                        prop_assert!(Rc::ptr_eq(&got.expect("non-empty"), &pool[i]));
                        stale.push(live.remove(&i).expect("tracked handle"));
                    }
                }
                Op::RemoveLast => {
                    let got = sut.remove_last();
                    match model.pop() {
                        Some(i) => {
                            prop_assert!(Rc::ptr_eq(&got.expect("non-empty"), &pool[i]));
                            stale.push(live.remove(&i).expect("tracked handle"));
                        }
                        None => prop_assert!(got.is_none()),
                    }
                }
                Op::Contains(i) => {
                    prop_assert_eq!(sut.contains(&pool[i]), model.contains(&i));
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                    stale.extend(live.drain().map(|(_, h)| h));
                }
            }

            // Post-conditions after each op
            check_links(&sut, &model, &pool)?;
            match (sut.first(), model.first()) {
                (Some(v), Some(&i)) => prop_assert!(Rc::ptr_eq(v, &pool[i])),
                (None, None) => {}
                _ => prop_assert!(false, "first disagrees with model"),
            }
            match (sut.last(), model.last()) {
                (Some(v), Some(&i)) => prop_assert!(Rc::ptr_eq(v, &pool[i])),
                (None, None) => {}
                _ => prop_assert!(false, "last disagrees with model"),
            }
            for &h in &stale {
                prop_assert!(sut.node(h).is_none());
            }
            // the chain's shares are the only extra strong counts
            for (i, v) in pool.iter().enumerate() {
                let held = usize::from(model.contains(&i));
                prop_assert_eq!(Rc::strong_count(v), 1 + held);
            }
        }
    }
}
