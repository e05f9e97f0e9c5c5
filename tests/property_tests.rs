//! Property-based tests for scope resolution and transitions.
//!
//! These tests use proptest to verify the resolver invariants hold across
//! many randomly generated key sets.

use proptest::prelude::*;
use stateworks::{Scope, Stateful, StateContainer, StatefulError, Value};

prop_compose! {
    fn arbitrary_keys()(keys in prop::collection::vec("[a-e]{1,2}", 0..8)) -> Vec<String> {
        keys
    }
}

fn object_with(common: &[String], state: &[String]) -> Stateful {
    let current: StateContainer = state
        .iter()
        .map(|k| (k.clone(), Value::from(format!("state:{}", k))))
        .collect();
    let object = Stateful::from_state(current).unwrap();
    object.common().extend(
        common
            .iter()
            .map(|k| (k.clone(), Value::from(format!("common:{}", k)))),
    );
    object
}

proptest! {
    #[test]
    fn common_always_wins(common in arbitrary_keys(), state in arbitrary_keys()) {
        let object = object_with(&common, &state);

        for key in &common {
            prop_assert_eq!(object.get(key), Value::from(format!("common:{}", key)));
            prop_assert_eq!(object.owner(key), Some(Scope::Common));
        }
    }

    #[test]
    fn state_keys_resolve_when_not_shadowed(common in arbitrary_keys(), state in arbitrary_keys()) {
        let object = object_with(&common, &state);

        for key in state.iter().filter(|k| !common.contains(k)) {
            prop_assert_eq!(object.get(key), Value::from(format!("state:{}", key)));
        }
    }

    #[test]
    fn keys_are_unique_union(common in arbitrary_keys(), state in arbitrary_keys()) {
        let object = object_with(&common, &state);
        let keys = object.keys();

        let mut deduped = keys.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), keys.len());

        for key in common.iter().chain(state.iter()) {
            prop_assert!(keys.contains(key));
            prop_assert!(object.has(key));
        }
    }

    #[test]
    fn deleting_common_keys_is_soft(common in arbitrary_keys(), state in arbitrary_keys()) {
        let object = object_with(&common, &state);

        for key in &common {
            prop_assert!(object.delete(key));
            prop_assert!(object.get(key).is_undefined());
            prop_assert!(object.keys().contains(key));
        }
    }

    #[test]
    fn transition_swaps_state_but_not_common(
        common in arbitrary_keys(),
        state in arbitrary_keys(),
        next in arbitrary_keys(),
    ) {
        let object = object_with(&common, &state);
        let incoming: StateContainer = next
            .iter()
            .map(|k| (k.clone(), Value::from(format!("next:{}", k))))
            .collect();

        object.enter(incoming).unwrap();

        for key in common.iter() {
            prop_assert_eq!(object.get(key), Value::from(format!("common:{}", key)));
        }
        for key in state.iter().chain(next.iter()).filter(|k| !common.contains(k)) {
            let expected = if next.contains(key) {
                Value::from(format!("next:{}", key))
            } else {
                Value::Undefined
            };
            prop_assert_eq!(object.get(key), expected);
        }
    }

    #[test]
    fn unknown_names_are_rejected(name in "[a-z]{1,8}") {
        let object = Stateful::builder()
            .state("known", StateContainer::new())
            .initial("known")
            .build()
            .unwrap();
        prop_assume!(name != "known");

        prop_assert_eq!(
            object.enter(name.as_str()),
            Err(StatefulError::invalid_state(name.clone()))
        );
        prop_assert_eq!(object.state_name(), Some("known".to_string()));
    }
}
