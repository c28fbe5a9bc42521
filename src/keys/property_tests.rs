//! Property-Based Tests for Keys Module
//!
//! Uses proptest to check the key store invariants.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::keys::{ApiKeyStore, KEY_HEX_LENGTH};

// == Strategies ==
/// Generates probe strings that are never valid keys (wrong length or alphabet)
fn foreign_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-f0-9]{0,47}".prop_map(|s| s),
        "[g-z]{48}".prop_map(|s| s),
        "[A-F0-9]{48}".prop_map(|s| s),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Every issued key validates, and all issued keys are distinct.
    #[test]
    fn prop_issued_keys_validate_and_are_unique(count in 1usize..40) {
        let mut store = ApiKeyStore::new();
        let mut seen = HashSet::new();

        for _ in 0..count {
            let key = store.issue();
            prop_assert_eq!(key.len(), KEY_HEX_LENGTH);
            prop_assert!(seen.insert(key));
        }

        for key in &seen {
            prop_assert!(store.validate(Some(key)));
        }
        prop_assert_eq!(store.len(), count);
        prop_assert_eq!(store.stats().issued, count as u64);
    }

    // Strings that were never issued are rejected and counted as rejections.
    #[test]
    fn prop_foreign_keys_rejected(probes in prop::collection::vec(foreign_key_strategy(), 1..20)) {
        let mut store = ApiKeyStore::new();
        store.issue();

        for probe in &probes {
            prop_assert!(!store.validate(Some(probe)));
        }
        prop_assert_eq!(store.stats().rejected, probes.len() as u64);
        prop_assert_eq!(store.stats().accepted, 0);
    }
}
