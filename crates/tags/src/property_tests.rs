use proptest::prelude::*;

use crate::TagsContainer;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,8}"
}

proptest! {
    #[test]
    fn register_twice_keeps_strength(name in name_strategy(), strength in 0u32..100) {
        let mut tags = TagsContainer::new();
        tags.set(&name, strength);
        let before = tags.len();
        let upper = name.to_uppercase();
        let tag = tags.register(&upper).unwrap();
        prop_assert_eq!(tag.strength(), strength);
        prop_assert_eq!(tag.name(), name.to_lowercase());
        prop_assert_eq!(tags.len(), before);
    }

    #[test]
    fn sub_commits_or_does_nothing(start in 0u32..50, delta in 0u32..100) {
        let mut tags = TagsContainer::new();
        tags.set("t", start);
        tags.sub("t", delta);
        let expected = if delta <= start { start - delta } else { start };
        prop_assert_eq!(tags.strength_of("t"), expected);
    }

    #[test]
    fn set_ratchets_to_max(a in 0u32..1000, b in 0u32..1000) {
        let mut tags = TagsContainer::new();
        tags.set("t", a);
        tags.set("t", b);
        prop_assert_eq!(tags.strength_of("t"), a.max(b));
    }

    #[test]
    fn listing_is_sorted(names in prop::collection::vec(name_strategy(), 0..20)) {
        let mut tags = TagsContainer::new();
        for name in &names {
            tags.set(name, 1);
        }
        let listed = tags.names();
        let mut sorted = listed.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(listed, sorted);
    }

    #[test]
    fn grouping_covers_every_applied_tag(
        entries in prop::collection::vec((name_strategy(), 0u32..6), 0..20)
    ) {
        let tags = TagsContainer::from_map(entries);
        let groups = tags.grouped_by_strength();
        prop_assert_eq!(groups.len() as u32, tags.highest());
        for (level, group) in groups.iter().enumerate() {
            for name in group.split_whitespace() {
                prop_assert_eq!(tags.strength_of(name), level as u32 + 1);
            }
        }
        let grouped: usize = groups.iter().map(|g| g.split_whitespace().count()).sum();
        prop_assert_eq!(grouped, tags.names().len());
        if let Some(last) = groups.last() {
            prop_assert!(!last.is_empty());
        }
    }
}
