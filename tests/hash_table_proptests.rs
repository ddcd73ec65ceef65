// HashTable property tests.
//
// Property 1: routing.
//  - Model: per-bucket Vec of (value id) with buckets chosen as key % size.
//  - Invariant: after any add/remove sequence, contains(k, v) holds exactly
//    for pairs the model holds; values never added are never found.
//
// Property 2: canonical enumeration.
//  - Invariant: iter() equals the model flattened bucket by bucket; first()
//    and last() are the ends of that sequence; draining with remove_first
//    (or remove_last) yields it forwards (or backwards) exactly once.
use chained_hashtable::{Datum, DatumKind, Error, HashTable};
use proptest::prelude::*;
use std::rc::Rc;

fn flatten(model: &[Vec<(i32, Rc<Datum>)>]) -> Vec<Rc<Datum>> {
    model
        .iter()
        .flat_map(|b| b.iter().map(|(_, v)| Rc::clone(v)))
        .collect()
}

proptest! {
    #[test]
    fn prop_routing_matches_model(
        size in 1usize..=8,
        ops in proptest::collection::vec((any::<bool>(), 0i32..64, 0usize..16), 1..80)
    ) {
        let mut t = HashTable::new(size, DatumKind::Integer, DatumKind::Integer).unwrap();
        // a fixed pool of value handles; index = identity
        let pool: Vec<Rc<Datum>> = (0..16).map(|i| Rc::new(Datum::Integer(i))).collect();
        let mut model: Vec<Vec<(i32, Rc<Datum>)>> = vec![Vec::new(); size];

        for (add, key, vi) in ops {
            let b = key as usize % size;
            let v = &pool[vi];
            let present = model[b].iter().any(|(_, m)| Rc::ptr_eq(m, v));
            if add {
                match t.add(&Datum::Integer(key), Rc::clone(v)) {
                    Ok(()) => {
                        prop_assert!(!present);
                        model[b].push((key, Rc::clone(v)));
                    }
                    Err(Error::DuplicateValue { bucket }) => {
                        prop_assert!(present);
                        prop_assert_eq!(bucket, b);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
            } else {
                match t.remove(&Datum::Integer(key), v) {
                    Ok(removed) => {
                        prop_assert!(present);
                        prop_assert!(Rc::ptr_eq(&removed, v));
                        model[b].retain(|(_, m)| !Rc::ptr_eq(m, v));
                    }
                    Err(Error::ValueNotFound { bucket }) => {
                        prop_assert!(!present);
                        prop_assert_eq!(bucket, b);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
            }

            let total: usize = model.iter().map(Vec::len).sum();
            prop_assert_eq!(t.len(), total);
            for (bi, bucket) in model.iter().enumerate() {
                prop_assert_eq!(t.bucket(bi).unwrap().len(), bucket.len());
                for (k, m) in bucket {
                    prop_assert_eq!(t.contains(&Datum::Integer(*k), m), Ok(true));
                }
            }
        }

        // a handle that was never added is never found
        let stranger = Rc::new(Datum::Integer(0));
        for key in 0..size as i32 {
            prop_assert_eq!(t.contains(&Datum::Integer(key), &stranger), Ok(false));
        }
    }

    #[test]
    fn prop_canonical_enumeration(
        size in 1usize..=8,
        keys in proptest::collection::vec(0i32..64, 0..40),
        from_back in any::<bool>()
    ) {
        let mut t = HashTable::new(size, DatumKind::Integer, DatumKind::Integer).unwrap();
        let mut model: Vec<Vec<(i32, Rc<Datum>)>> = vec![Vec::new(); size];
        for (i, &key) in keys.iter().enumerate() {
            let v = Rc::new(Datum::Integer(i as i32));
            t.add(&Datum::Integer(key), Rc::clone(&v)).unwrap();
            model[key as usize % size].push((key, v));
        }

        let expected = flatten(&model);
        let seen: Vec<Rc<Datum>> = t.iter().map(|(_, v)| Rc::clone(v)).collect();
        prop_assert_eq!(seen.len(), expected.len());
        for (a, b) in seen.iter().zip(&expected) {
            prop_assert!(Rc::ptr_eq(a, b));
        }
        match (t.first(), expected.first()) {
            (Some(a), Some(b)) => prop_assert!(Rc::ptr_eq(a, b)),
            (None, None) => {}
            _ => prop_assert!(false, "first disagrees with model"),
        }
        match (t.last(), expected.last()) {
            (Some(a), Some(b)) => prop_assert!(Rc::ptr_eq(a, b)),
            (None, None) => {}
            _ => prop_assert!(false, "last disagrees with model"),
        }

        let mut drained = Vec::new();
        loop {
            let next = if from_back { t.remove_last() } else { t.remove_first() };
            match next {
                Ok(v) => drained.push(v),
                Err(e) => {
                    prop_assert_eq!(e, Error::Empty);
                    break;
                }
            }
        }
        if from_back {
            drained.reverse();
        }
        prop_assert_eq!(drained.len(), expected.len());
        for (a, b) in drained.iter().zip(&expected) {
            prop_assert!(Rc::ptr_eq(a, b));
        }
        prop_assert!(t.is_empty());
    }
}
