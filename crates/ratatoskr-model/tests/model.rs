//! Property tests for the selection model.

use proptest::prelude::*;
use ratatoskr_model::{GroupScopedTag, StringSet};

fn name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.-]{0,12}"
}

proptest! {
    #[test]
    fn even_toggles_restore_membership(
        initial in proptest::collection::vec("[a-z]{1,4}", 0..6),
        id in "[a-z]{1,4}",
        times in 0usize..9,
    ) {
        let mut set: StringSet = initial.into_iter().collect();
        let before = set.contains(&id);
        for _ in 0..times {
            set.toggle(id.clone());
        }
        let flipped = times % 2 == 1;
        prop_assert_eq!(set.contains(&id), before != flipped);
    }

    #[test]
    fn distinct_toggles_keep_first_toggle_order(
        ids in proptest::collection::hash_set("[a-z]{1,6}", 0..12),
    ) {
        let ids: Vec<String> = ids.into_iter().collect();
        let mut set = StringSet::new();
        for id in &ids {
            prop_assert!(!set.toggle(id.clone()));
        }
        prop_assert_eq!(set.len(), ids.len());
        prop_assert_eq!(set.get(), ids);
    }

    #[test]
    fn composite_key_round_trips(group in name(), tag in name()) {
        let key = format!("{group}::{tag}");
        let parsed = GroupScopedTag::parse(&key).unwrap();
        prop_assert_eq!(parsed.group(), group.as_str());
        prop_assert_eq!(parsed.tag(), tag.as_str());
        prop_assert_eq!(parsed.key(), key);
    }
}

#[test]
fn toggle_return_tracks_prior_state() {
    let mut set = StringSet::new();
    let states: Vec<bool> = (0..4).map(|_| set.toggle("cat")).collect();
    assert_eq!(states, vec![false, true, false, true]);
    assert!(set.is_empty());
}
