use serde::{Deserialize, Serialize};

use crate::domain::roster::{BowlerId, GroupMember, PartnerGroup};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRef {
    pub identifier: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeEntry {
    pub unique_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: BowlerId,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    pub position: u8,
    #[serde(default)]
    pub doubles_partner_id: Option<BowlerId>,
    #[serde(default)]
    pub amount_due: Option<String>,
    #[serde(default)]
    pub free_entry: Option<FreeEntry>,
}

/// A team as returned by `GET /teams/{identifier}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub shift: Option<ShiftRef>,
    #[serde(default)]
    pub shift_confirmed: bool,
    #[serde(default)]
    pub bowlers: Vec<TeamMember>,
}

impl Team {
    pub fn size(&self) -> usize {
        self.bowlers.len()
    }

    /// Roster positions not yet taken, lowest first.
    pub fn open_positions(&self, team_size: usize) -> Vec<u8> {
        let max = u8::try_from(team_size).unwrap_or(u8::MAX);
        (1..=max)
            .filter(|p| !self.bowlers.iter().any(|b| b.position == *p))
            .collect()
    }

    /// Doubles assignment view of the roster; empty when nobody has joined.
    pub fn partner_group(&self) -> Result<PartnerGroup, DomainError> {
        if self.bowlers.is_empty() {
            return Ok(PartnerGroup::empty());
        }
        PartnerGroup::new(
            self.bowlers
                .iter()
                .map(|b| GroupMember {
                    id: b.id,
                    position: b.position,
                    partner_id: b.doubles_partner_id,
                })
                .collect(),
        )
    }
}
