use std::collections::BTreeSet;

use hc_core::{
    clamp_stat, edit_salary_cap, enforce_le, normalize, safe_swap, sanitize_name, Error, Record,
    RecordSet,
};
use proptest::prelude::*;

fn record(pairs: &[(String, String)]) -> Record {
    Record::from_pairs(pairs.iter().cloned())
}

#[test]
fn sanitizer_example_from_the_editor() {
    assert_eq!(sanitize_name("J@ke  O'Brien-Smith III", 15), "Jke O'Brien-Smi");
}

#[test]
fn salary_cap_examples() {
    assert_eq!(edit_salary_cap("999999999").unwrap(), 260_000_000);
    assert_eq!(edit_salary_cap("-5").unwrap(), 0);
}

#[test]
fn swap_rejects_same_row() {
    let mut set = RecordSet::new();
    set.records.push(Record::from_pairs([("PGID", "1"), ("PFNA", "A")]));
    let before = set.records.clone();

    let immutable: BTreeSet<String> = BTreeSet::new();
    let err = safe_swap(&mut set, 0, 0, &immutable).unwrap_err();
    assert!(matches!(err, Error::InvariantViolation(_)));
    assert_eq!(set.records, before);
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in "\\PC*|[\u{feff}\u{a0}\t\r\n a-zA-Z]{0,20}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once.clone());
    }

    #[test]
    fn normalize_keeps_visible_ascii(s in "[A-Za-z0-9]{1,12}") {
        prop_assert_eq!(normalize(&s), s);
    }

    #[test]
    fn clamp_stat_stays_in_range(v in any::<i64>()) {
        let c = clamp_stat(v);
        prop_assert!((0..=99).contains(&c));
        if (0..=99).contains(&v) {
            prop_assert_eq!(c, v);
        }
    }

    #[test]
    fn enforce_le_holds_and_max_untouched(cur in -200i64..200, max in -200i64..200) {
        let mut r = Record::from_pairs([("PSPD", cur.to_string()), ("PSDX", max.to_string())]);
        enforce_le(&mut r, "PSPD", "PSDX");
        let new_cur = r.get_int("PSPD").unwrap();
        prop_assert!(new_cur <= max);
        prop_assert_eq!(r.get_int("PSDX"), Some(max));
        if cur <= max {
            prop_assert_eq!(new_cur, cur);
        }
    }

    #[test]
    fn sanitized_names_are_clean_and_stable(raw in "\\PC{0,40}", max_len in 1usize..30) {
        let out = sanitize_name(&raw, max_len);
        prop_assert!(out.chars().count() <= max_len);
        prop_assert!(out
            .chars()
            .all(|c| c.is_ascii_alphabetic() || matches!(c, ' ' | '\'' | '-' | '.')));
        prop_assert_eq!(sanitize_name(&out, max_len), out.clone());
    }

    #[test]
    fn swap_exchanges_only_mutable_shared_keys(
        shared in prop::collection::btree_map("[A-Z]{4}", ("[a-z0-9]{0,5}", "[a-z0-9]{0,5}"), 1..12),
        only_a in prop::collection::btree_map("[a-z]{5}", "[a-z0-9]{0,5}", 0..4),
        only_b in prop::collection::btree_map("[0-9]{5}", "[a-z0-9]{0,5}", 0..4),
        immutable_picks in prop::collection::vec(any::<prop::sample::Index>(), 0..4),
    ) {
        let keys: Vec<&String> = shared.keys().collect();
        let immutable: BTreeSet<String> = immutable_picks
            .iter()
            .map(|i| keys[i.index(keys.len())].clone())
            .collect();

        let a_pairs: Vec<(String, String)> = shared
            .iter()
            .map(|(k, (va, _))| (k.clone(), va.clone()))
            .chain(only_a.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect();
        let b_pairs: Vec<(String, String)> = shared
            .iter()
            .map(|(k, (_, vb))| (k.clone(), vb.clone()))
            .chain(only_b.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect();

        let mut set = RecordSet::new();
        set.records = vec![record(&a_pairs), record(&b_pairs)];
        safe_swap(&mut set, 0, 1, &immutable).unwrap();

        let (a, b) = (&set.records[0], &set.records[1]);
        for (k, (va, vb)) in &shared {
            if immutable.contains(k) {
                prop_assert_eq!(a.get(k), Some(va.as_str()));
                prop_assert_eq!(b.get(k), Some(vb.as_str()));
            } else {
                prop_assert_eq!(a.get(k), Some(vb.as_str()));
                prop_assert_eq!(b.get(k), Some(va.as_str()));
            }
        }
        for (k, v) in &only_a {
            prop_assert_eq!(a.get(k), Some(v.as_str()));
            prop_assert!(!b.contains(k));
        }
        for (k, v) in &only_b {
            prop_assert_eq!(b.get(k), Some(v.as_str()));
        }
    }
}
