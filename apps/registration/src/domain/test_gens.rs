// Proptest generators for roster types.
// Groups always carry unique ids; prior partner links may be arbitrary
// (including one-sided or dangling) to mimic stale form state.

use proptest::prelude::*;

use crate::domain::roster::{BowlerId, GroupMember, PartnerGroup, MAX_GROUP_SIZE};

/// Generate `count` distinct bowler ids
pub fn unique_ids(count: usize) -> impl Strategy<Value = Vec<BowlerId>> {
    prop::collection::hash_set(1i64..10_000, count)
        .prop_map(|set| set.into_iter().map(BowlerId).collect::<Vec<_>>())
        .prop_shuffle()
}

/// Generate a group of exactly `size` members with arbitrary prior links
pub fn group_of_size(size: usize) -> impl Strategy<Value = PartnerGroup> {
    (unique_ids(size), prop::collection::vec(any::<Option<usize>>(), size)).prop_map(
        move |(ids, links)| {
            let members = ids
                .iter()
                .zip(links)
                .enumerate()
                .map(|(i, (id, link))| GroupMember {
                    id: *id,
                    position: (i + 1) as u8,
                    partner_id: link.map(|l| ids[l % ids.len()]),
                })
                .collect();
            PartnerGroup::new(members).expect("generated ids are unique")
        },
    )
}

/// Generate a group of 2..=4 members
pub fn pairable_group() -> impl Strategy<Value = PartnerGroup> {
    (2usize..=MAX_GROUP_SIZE).prop_flat_map(group_of_size)
}

/// Generate a group together with two distinct member ids to pair
pub fn group_and_choice() -> impl Strategy<Value = (PartnerGroup, BowlerId, BowlerId)> {
    pairable_group().prop_flat_map(|group| {
        let len = group.len();
        (Just(group), 0..len, 1..len).prop_map(|(group, a, offset)| {
            let b = (a + offset) % group.len();
            let chosen = group.members()[a].id;
            let partner = group.members()[b].id;
            (group, chosen, partner)
        })
    })
}
