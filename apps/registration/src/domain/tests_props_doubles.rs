//! Property tests for doubles partner reconciliation (pure domain, no I/O).
//!
//! Contract:
//! - The chosen pair always points at each other afterwards
//! - Four bowlers always end up as two disjoint pairs
//! - Three bowlers leave exactly the remainder unpaired
//! - The input snapshot is never modified
//! - Repeating the same choice changes nothing

use proptest::prelude::*;

use crate::domain::doubles::{is_consistent, partner_of, reconcile, unpaired};
use crate::domain::test_gens;
use crate::domain::test_prelude;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: Reciprocity
    #[test]
    fn prop_chosen_pair_is_reciprocal(
        (group, chosen, partner) in test_gens::group_and_choice(),
    ) {
        let result = reconcile(&group, chosen, partner).unwrap();

        prop_assert_eq!(partner_of(&result, chosen), Some(partner));
        prop_assert_eq!(partner_of(&result, partner), Some(chosen));
    }

    /// Property: Result is always a valid matching, whatever stale links came in
    #[test]
    fn prop_result_is_consistent(
        (group, chosen, partner) in test_gens::group_and_choice(),
    ) {
        let result = reconcile(&group, chosen, partner).unwrap();
        prop_assert!(is_consistent(&result), "inconsistent result: {result:?}");
    }

    /// Property: Four-person closure
    /// Everybody is paired, and re-choosing the induced remainder pair is a no-op.
    #[test]
    fn prop_four_bowlers_fully_paired(
        (group, chosen, partner) in test_gens::group_of_size(4).prop_flat_map(|g| {
            (Just(g), 0usize..4, 1usize..4)
        }).prop_map(|(g, a, offset)| {
            let chosen = g.members()[a].id;
            let partner = g.members()[(a + offset) % 4].id;
            (g, chosen, partner)
        }),
    ) {
        let result = reconcile(&group, chosen, partner).unwrap();

        prop_assert!(unpaired(&result).is_empty());

        let rest: Vec<_> = result
            .ids()
            .filter(|id| *id != chosen && *id != partner)
            .collect();
        prop_assert_eq!(rest.len(), 2);

        let again = reconcile(&result, rest[0], rest[1]).unwrap();
        prop_assert_eq!(again, result);
    }

    /// Property: Three-person remainder is explicitly unpaired
    #[test]
    fn prop_three_bowlers_leave_remainder_unpaired(
        group in test_gens::group_of_size(3),
    ) {
        let ids: Vec<_> = group.ids().collect();
        let result = reconcile(&group, ids[0], ids[1]).unwrap();

        prop_assert_eq!(partner_of(&result, ids[2]), None);
        prop_assert_eq!(unpaired(&result), vec![ids[2]]);
    }

    /// Property: Two-person group only gets the reciprocal write
    #[test]
    fn prop_two_bowlers_only_pair(
        group in test_gens::group_of_size(2),
    ) {
        let ids: Vec<_> = group.ids().collect();
        let result = reconcile(&group, ids[0], ids[1]).unwrap();

        prop_assert_eq!(partner_of(&result, ids[0]), Some(ids[1]));
        prop_assert_eq!(partner_of(&result, ids[1]), Some(ids[0]));
        for (before, after) in group.members().iter().zip(result.members()) {
            prop_assert_eq!(before.id, after.id);
            prop_assert_eq!(before.position, after.position);
        }
    }

    /// Property: Idempotence
    #[test]
    fn prop_reconcile_is_idempotent(
        (group, chosen, partner) in test_gens::group_and_choice(),
    ) {
        let once = reconcile(&group, chosen, partner).unwrap();
        let twice = reconcile(&once, chosen, partner).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: Non-mutation and order preservation
    #[test]
    fn prop_input_untouched_and_order_kept(
        (group, chosen, partner) in test_gens::group_and_choice(),
    ) {
        let before = group.clone();
        let result = reconcile(&group, chosen, partner).unwrap();

        prop_assert_eq!(&group, &before);
        let before_ids: Vec<_> = before.ids().collect();
        let after_ids: Vec<_> = result.ids().collect();
        prop_assert_eq!(before_ids, after_ids);
    }
}
