//! Doubles partner assignment within a team or pair registration.
//!
//! One partner choice determines the whole group: the chosen two are paired,
//! the other two (if any) are paired with each other, and a lone leftover
//! bowler is left without a partner.

use tracing::debug;

use crate::domain::roster::{BowlerId, GroupMember, PartnerGroup};
use crate::errors::domain::{DomainError, PreconditionKind};

/// Pair `chosen` with `partner` and recompute every other link in the group.
///
/// The input snapshot is not modified; the returned group replaces it.
pub fn reconcile(
    group: &PartnerGroup,
    chosen: BowlerId,
    partner: BowlerId,
) -> Result<PartnerGroup, DomainError> {
    if group.len() < 2 {
        return Err(DomainError::precondition(
            PreconditionKind::GroupSize,
            format!("partner selection needs at least 2 bowlers, group has {}", group.len()),
        ));
    }
    if chosen == partner {
        return Err(DomainError::precondition(
            PreconditionKind::SameBowler,
            format!("bowler {chosen} cannot partner with themselves"),
        ));
    }
    for id in [chosen, partner] {
        if !group.contains(id) {
            return Err(DomainError::precondition(
                PreconditionKind::UnknownBowler,
                format!("bowler {id} is not in this group"),
            ));
        }
    }

    let mut members: Vec<GroupMember> = group.members().to_vec();
    let remainder: Vec<usize> = members
        .iter()
        .enumerate()
        .filter(|(_, m)| m.id != chosen && m.id != partner)
        .map(|(i, _)| i)
        .collect();

    for member in members.iter_mut() {
        if member.id == chosen {
            member.partner_id = Some(partner);
        } else if member.id == partner {
            member.partner_id = Some(chosen);
        }
    }

    match remainder.as_slice() {
        [left, right] => {
            let (left_id, right_id) = (members[*left].id, members[*right].id);
            members[*left].partner_id = Some(right_id);
            members[*right].partner_id = Some(left_id);
        }
        [lone] => members[*lone].partner_id = None,
        _ => {}
    }

    debug!(%chosen, %partner, group_size = members.len(), "Doubles partners reconciled");

    Ok(PartnerGroup::from_checked(members))
}

/// Partner currently assigned to `id`, if any.
pub fn partner_of(group: &PartnerGroup, id: BowlerId) -> Option<BowlerId> {
    group.get(id).and_then(|m| m.partner_id)
}

/// Members without a partner, in group order.
pub fn unpaired(group: &PartnerGroup) -> Vec<BowlerId> {
    group
        .members()
        .iter()
        .filter(|m| m.partner_id.is_none())
        .map(|m| m.id)
        .collect()
}

/// Whether the partner links form a matching: every link points at another
/// member of the group, and that member points back.
pub fn is_consistent(group: &PartnerGroup) -> bool {
    group.members().iter().all(|m| match m.partner_id {
        None => true,
        Some(p) if p == m.id => false,
        Some(p) => partner_of(group, p) == Some(m.id),
    })
}
