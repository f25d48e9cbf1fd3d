//! Request bodies the remote API expects on submission.

use serde::Serialize;

use crate::domain::bowler::{BowlerDetails, EntryBowler};
use crate::domain::commerce::ItemCategory;
use crate::domain::roster::{BowlerId, PartnerGroup};
use crate::domain::tournament::Tournament;
use crate::domain::validation::TEAM_NAME_MAX_LEN;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonAttributes {
    pub first_name: String,
    pub last_name: String,
    pub usbc_id: String,
    pub igbo_id: String,
    pub birth_month: String,
    pub birth_day: String,
    pub nickname: String,
    pub phone: String,
    pub email: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl From<&BowlerDetails> for PersonAttributes {
    fn from(d: &BowlerDetails) -> Self {
        Self {
            first_name: d.first_name.trim().to_string(),
            last_name: d.last_name.trim().to_string(),
            usbc_id: d.usbc_id.trim().to_string(),
            igbo_id: d.igbo_id.trim().to_string(),
            birth_month: d.birth_month.trim().to_string(),
            birth_day: d.birth_day.trim().to_string(),
            nickname: d.nickname.trim().to_string(),
            phone: d.phone.trim().to_string(),
            email: d.email.trim().to_string(),
            address1: d.address1.trim().to_string(),
            address2: d.address2.trim().to_string(),
            city: d.city.trim().to_string(),
            state: d.state.trim().to_string(),
            country: d.country.trim().to_string(),
            postal_code: d.postal_code.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResponse {
    pub name: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BowlerAttributes {
    pub position: u8,
    pub doubles_partner_num: Option<u8>,
    pub person_attributes: PersonAttributes,
    pub additional_question_responses: Vec<QuestionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_identifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTeam {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_identifier: Option<String>,
    pub bowlers_attributes: Vec<BowlerAttributes>,
}

/// Body for `POST /tournaments/{id}/teams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTeamRequest {
    pub team: NewTeam,
}

/// Body for `POST /teams/{id}/bowlers` and solo `POST /tournaments/{id}/bowlers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BowlerRequest {
    pub bowler: BowlerAttributes,
}

/// Body for a new doubles pair, `POST /tournaments/{id}/bowlers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairRequest {
    pub bowlers: Vec<BowlerAttributes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterBowlerAttributes {
    pub id: BowlerId,
    pub position: u8,
    pub doubles_partner_id: Option<BowlerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_identifier: Option<String>,
    pub bowlers_attributes: Vec<RosterBowlerAttributes>,
}

/// Body for the director's `PATCH /director/teams/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamUpdateRequest {
    pub team: TeamUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamName {
    pub name: String,
}

/// Body for the director's `POST /director/tournaments/{id}/teams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorTeamRequest {
    pub team: TeamName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemConfiguration {
    pub order: u32,
}

/// One item a director is adding to a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPurchasableItem {
    pub category: ItemCategory,
    pub determination: String,
    pub name: String,
    /// Whole dollars.
    pub value: i64,
    pub configuration: ItemConfiguration,
}

/// Body for `POST /director/tournaments/{id}/purchasable_items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPurchasableItemsRequest {
    pub purchasable_items: Vec<NewPurchasableItem>,
}

/// A team created by name only; bowlers join it later.
pub fn director_team_request(name: &str) -> Result<DirectorTeamRequest, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("team name is required"));
    }
    if name.chars().count() > TEAM_NAME_MAX_LEN {
        return Err(DomainError::validation(format!(
            "team name is limited to {TEAM_NAME_MAX_LEN} characters"
        )));
    }
    Ok(DirectorTeamRequest {
        team: TeamName {
            name: name.to_string(),
        },
    })
}

/// One response per tournament question, blank when unanswered.
pub fn question_responses(
    tournament: &Tournament,
    details: &BowlerDetails,
) -> Vec<QuestionResponse> {
    tournament
        .ordered_questions()
        .into_iter()
        .map(|(name, _)| QuestionResponse {
            name: name.to_string(),
            response: details.answer(name).to_string(),
        })
        .collect()
}

pub fn bowler_attributes(tournament: &Tournament, bowler: &EntryBowler) -> BowlerAttributes {
    BowlerAttributes {
        position: bowler.position,
        doubles_partner_num: bowler.doubles_partner_num,
        person_attributes: PersonAttributes::from(&bowler.details),
        additional_question_responses: question_responses(tournament, &bowler.details),
        shift_identifier: bowler.details.shift.clone(),
    }
}

pub fn new_team_request(
    tournament: &Tournament,
    name: &str,
    shift: Option<&str>,
    bowlers: &[EntryBowler],
) -> NewTeamRequest {
    NewTeamRequest {
        team: NewTeam {
            name: name.trim().to_string(),
            shift_identifier: shift.map(str::to_string),
            bowlers_attributes: bowlers
                .iter()
                .map(|b| bowler_attributes(tournament, b))
                .collect(),
        },
    }
}

pub fn bowler_request(tournament: &Tournament, bowler: &EntryBowler) -> BowlerRequest {
    BowlerRequest {
        bowler: bowler_attributes(tournament, bowler),
    }
}

pub fn pair_request(tournament: &Tournament, bowlers: &[EntryBowler]) -> PairRequest {
    PairRequest {
        bowlers: bowlers
            .iter()
            .map(|b| bowler_attributes(tournament, b))
            .collect(),
    }
}

pub fn team_update_request(
    name: &str,
    shift: Option<&str>,
    group: &PartnerGroup,
) -> TeamUpdateRequest {
    TeamUpdateRequest {
        team: TeamUpdate {
            name: name.trim().to_string(),
            shift_identifier: shift.map(str::to_string),
            bowlers_attributes: group
                .members()
                .iter()
                .map(|m| RosterBowlerAttributes {
                    id: m.id,
                    position: m.position,
                    doubles_partner_id: m.partner_id,
                })
                .collect(),
        },
    }
}
