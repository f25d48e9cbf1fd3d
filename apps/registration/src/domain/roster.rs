use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, PreconditionKind};

/// Largest number of bowlers that share doubles assignments.
pub const MAX_GROUP_SIZE: usize = 4;

/// Stable bowler identifier as handed out by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BowlerId(pub i64);

impl fmt::Display for BowlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BowlerId {
    fn from(value: i64) -> Self {
        BowlerId(value)
    }
}

/// One bowler as seen by the doubles partner assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: BowlerId,
    /// 1-based, display ordering only.
    pub position: u8,
    #[serde(default, alias = "doubles_partner_id")]
    pub partner_id: Option<BowlerId>,
}

impl GroupMember {
    pub fn new(id: impl Into<BowlerId>, position: u8) -> Self {
        Self {
            id: id.into(),
            position,
            partner_id: None,
        }
    }

    pub fn with_partner(mut self, partner: impl Into<BowlerId>) -> Self {
        self.partner_id = Some(partner.into());
        self
    }
}

/// Ordered set of 1..=4 bowlers whose doubles partners are assigned together.
///
/// Snapshots are immutable from the outside; every change produces a new group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PartnerGroup {
    members: Vec<GroupMember>,
}

impl PartnerGroup {
    /// Build a group, rejecting empty/oversized groups and duplicate ids.
    pub fn new(members: Vec<GroupMember>) -> Result<Self, DomainError> {
        if members.is_empty() || members.len() > MAX_GROUP_SIZE {
            return Err(DomainError::precondition(
                PreconditionKind::GroupSize,
                format!(
                    "group must hold 1..={MAX_GROUP_SIZE} bowlers, got {}",
                    members.len()
                ),
            ));
        }

        let mut seen = HashSet::with_capacity(members.len());
        for member in &members {
            if !seen.insert(member.id) {
                return Err(DomainError::precondition(
                    PreconditionKind::DuplicateBowler,
                    format!("bowler {} appears more than once", member.id),
                ));
            }
        }

        Ok(Self { members })
    }

    /// A team with no bowlers yet. Partner selection rejects it.
    pub fn empty() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: BowlerId) -> Option<&GroupMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: BowlerId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = BowlerId> + '_ {
        self.members.iter().map(|m| m.id)
    }

    pub fn into_members(self) -> Vec<GroupMember> {
        self.members
    }

    /// Copy of this group with one member's position changed.
    pub fn with_position(&self, id: BowlerId, position: u8) -> Result<Self, DomainError> {
        let mut members = self.members.clone();
        let member = members.iter_mut().find(|m| m.id == id).ok_or_else(|| {
            DomainError::precondition(
                PreconditionKind::UnknownBowler,
                format!("bowler {id} is not in this group"),
            )
        })?;
        member.position = position;
        Ok(Self { members })
    }

    /// Crate-internal constructor for snapshots derived from an already valid group.
    pub(crate) fn from_checked(members: Vec<GroupMember>) -> Self {
        Self { members }
    }
}

impl<'de> Deserialize<'de> for PartnerGroup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let members = Vec::<GroupMember>::deserialize(deserializer)?;
        PartnerGroup::new(members).map_err(serde::de::Error::custom)
    }
}
