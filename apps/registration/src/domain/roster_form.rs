//! Director-side team edit form.
//!
//! Holds the editable copy of a fetched team. Each edit returns a new form;
//! the original team is kept so the screen can tell whether anything changed.

use crate::domain::doubles::reconcile;
use crate::domain::payload::{team_update_request, TeamUpdateRequest};
use crate::domain::roster::{BowlerId, PartnerGroup};
use crate::domain::team::Team;
use crate::domain::validation::{validate_positions, validate_team_form, ValidationReport};
use crate::domain::tournament::Tournament;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterForm {
    team_identifier: String,
    name: String,
    shift: Option<String>,
    group: PartnerGroup,
    initial_name: String,
    initial_shift: Option<String>,
    initial_group: PartnerGroup,
}

impl RosterForm {
    pub fn from_team(team: &Team) -> Result<Self, DomainError> {
        let group = team.partner_group()?;
        let shift = team.shift.as_ref().map(|s| s.identifier.clone());
        Ok(Self {
            team_identifier: team.identifier.clone(),
            name: team.name.clone(),
            shift: shift.clone(),
            group: group.clone(),
            initial_name: team.name.clone(),
            initial_shift: shift,
            initial_group: group,
        })
    }

    pub fn team_identifier(&self) -> &str {
        &self.team_identifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shift(&self) -> Option<&str> {
        self.shift.as_deref()
    }

    pub fn group(&self) -> &PartnerGroup {
        &self.group
    }

    pub fn rename(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn change_shift(&self, shift: Option<String>) -> Self {
        Self {
            shift,
            ..self.clone()
        }
    }

    pub fn set_position(&self, id: BowlerId, position: u8) -> Result<Self, DomainError> {
        Ok(Self {
            group: self.group.with_position(id, position)?,
            ..self.clone()
        })
    }

    /// Pair `chosen` with `partner` and re-derive the rest of the team's pairings.
    pub fn choose_partner(&self, chosen: BowlerId, partner: BowlerId) -> Result<Self, DomainError> {
        Ok(Self {
            group: reconcile(&self.group, chosen, partner)?,
            ..self.clone()
        })
    }

    /// Whether anything differs from the team as fetched.
    pub fn touched(&self) -> bool {
        self.name != self.initial_name
            || self.shift != self.initial_shift
            || self.group != self.initial_group
    }

    pub fn validate(&self, tournament: &Tournament) -> ValidationReport {
        let mut report = validate_team_form(&self.name, self.shift.as_deref(), tournament);
        report.extend(validate_positions(&self.group, tournament.team_size()));
        report
    }

    pub fn is_valid(&self, tournament: &Tournament) -> bool {
        self.validate(tournament).is_valid()
    }

    /// Body for the director team update; fails when the form isn't valid.
    pub fn to_update_payload(
        &self,
        tournament: &Tournament,
    ) -> Result<TeamUpdateRequest, DomainError> {
        self.validate(tournament).into_result()?;
        Ok(team_update_request(&self.name, self.shift.as_deref(), &self.group))
    }
}

#[cfg(test)]
mod tests {
    use registration_test_support::fixtures;

    use super::*;
    use crate::domain::doubles::partner_of;

    fn tournament() -> Tournament {
        serde_json::from_value(fixtures::tournament_json()).unwrap()
    }

    fn form() -> RosterForm {
        let team: Team = serde_json::from_value(fixtures::team_json(4)).unwrap();
        RosterForm::from_team(&team).unwrap()
    }

    #[test]
    fn fresh_form_is_untouched_and_valid() {
        let form = form();
        assert!(!form.touched());
        assert!(form.is_valid(&tournament()));
        assert_eq!(form.shift(), Some("shift-fri"));
    }

    #[test]
    fn choose_partner_reconciles_team() {
        let form = form()
            .choose_partner(BowlerId(101), BowlerId(103))
            .unwrap();
        let group = form.group();
        assert_eq!(partner_of(group, BowlerId(101)), Some(BowlerId(103)));
        assert_eq!(partner_of(group, BowlerId(102)), Some(BowlerId(104)));
        assert!(form.touched());
    }

    #[test]
    fn reverting_an_edit_clears_touched() {
        let original = form();
        let edited = original.rename("Gutter Gang").rename(original.name());
        assert!(!edited.touched());
    }

    #[test]
    fn duplicate_positions_block_payload() {
        let form = form().set_position(BowlerId(101), 2).unwrap();
        let report = form.validate(&tournament());
        assert!(report.has_error("position[101]") || report.has_error("position[102]"));
        assert!(form.to_update_payload(&tournament()).is_err());
    }

    #[test]
    fn set_position_unknown_bowler() {
        let err = form().set_position(BowlerId(999), 1).unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn blank_name_is_invalid() {
        assert!(!form().rename("   ").is_valid(&tournament()));
    }

    #[test]
    fn team_without_bowlers_can_be_renamed() {
        let team: Team = serde_json::from_value(fixtures::team_json(0)).unwrap();
        let form = RosterForm::from_team(&team).unwrap();
        assert!(form.group().is_empty());

        let payload = form
            .rename("Late Entry")
            .change_shift(Some("shift-sat".into()))
            .to_update_payload(&tournament())
            .unwrap();
        assert_eq!(payload.team.name, "Late Entry");
        assert_eq!(payload.team.shift_identifier.as_deref(), Some("shift-sat"));
        assert!(payload.team.bowlers_attributes.is_empty());
    }

    #[test]
    fn team_without_bowlers_rejects_partner_choice() {
        let team: Team = serde_json::from_value(fixtures::team_json(0)).unwrap();
        let err = RosterForm::from_team(&team)
            .unwrap()
            .choose_partner(BowlerId(101), BowlerId(102))
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn payload_reflects_edits() {
        let payload = form()
            .rename("Pin Pals")
            .change_shift(Some("shift-sat".into()))
            .choose_partner(BowlerId(102), BowlerId(104))
            .unwrap()
            .to_update_payload(&tournament())
            .unwrap();
        assert_eq!(payload.team.name, "Pin Pals");
        assert_eq!(payload.team.shift_identifier.as_deref(), Some("shift-sat"));
        let partners: Vec<_> = payload
            .team
            .bowlers_attributes
            .iter()
            .map(|b| (b.id.0, b.doubles_partner_id.map(|p| p.0)))
            .collect();
        assert_eq!(
            partners,
            vec![(101, Some(103)), (102, Some(104)), (103, Some(101)), (104, Some(102))]
        );
    }
}
