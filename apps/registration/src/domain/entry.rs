//! The in-progress registration a visitor is building.
//!
//! `RegistrationEntry` is an immutable snapshot. Every user step is a
//! [`EntryAction`] applied with [`RegistrationEntry::apply`], which returns the
//! next snapshot or explains why the step isn't allowed.

use tracing::debug;

use crate::domain::bowler::{BowlerDetails, EntryBowler};
use crate::domain::doubles::reconcile;
use crate::domain::payload::{
    bowler_request, new_team_request, pair_request, BowlerRequest, NewTeamRequest, PairRequest,
};
use crate::domain::roster::{BowlerId, GroupMember, PartnerGroup};
use crate::domain::team::Team;
use crate::domain::tournament::Tournament;
use crate::domain::validation::{validate_bowler, validate_team_form};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryKind {
    #[default]
    None,
    NewTeam,
    JoinTeam,
    Solo,
    NewPair,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryAction {
    TournamentDetailsRetrieved(Tournament),

    NewTeamRegistrationInitiated,
    TeamInfoAdded { name: String, shift: Option<String> },
    NewTeamBowlerInfoAdded(BowlerDetails),
    NewTeamBowlerUpdated { index: usize, details: BowlerDetails },
    /// Positions of the two bowlers chosen as doubles partners.
    NewTeamPartnersSelected { chosen: u8, partner: u8 },
    NewTeamEntryCompleted,

    JoinTeamRegistrationInitiated(Team),
    ExistingTeamBowlerInfoAdded(BowlerDetails),
    ExistingTeamBowlerEdited(BowlerDetails),
    SubmitJoinTeamCompleted,

    NewSoloRegistrationInitiated,
    SoloBowlerInfoAdded(BowlerDetails),
    SoloBowlerInfoUpdated(BowlerDetails),
    SoloBowlerRegistrationCompleted,

    NewPairRegistrationInitiated,
    NewPairBowlerInfoAdded(BowlerDetails),
    NewPairBowlerUpdated { index: usize, details: BowlerDetails },
    NewPairRegistrationCompleted,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationEntry {
    tournament: Option<Tournament>,
    kind: EntryKind,
    team_name: Option<String>,
    shift: Option<String>,
    bowlers: Vec<EntryBowler>,
    team: Option<Team>,
    completed: bool,
}

impl RegistrationEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tournament(&self) -> Option<&Tournament> {
        self.tournament.as_ref()
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn team_name(&self) -> Option<&str> {
        self.team_name.as_deref()
    }

    pub fn shift(&self) -> Option<&str> {
        self.shift.as_deref()
    }

    pub fn bowlers(&self) -> &[EntryBowler] {
        &self.bowlers
    }

    pub fn team(&self) -> Option<&Team> {
        self.team.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Produce the snapshot that follows `action`.
    pub fn apply(&self, action: EntryAction) -> Result<Self, DomainError> {
        use EntryAction as A;

        let next = match action {
            A::TournamentDetailsRetrieved(tournament) => self.with_tournament(tournament),

            A::NewTeamRegistrationInitiated => {
                let tournament = self.require_tournament()?;
                if !tournament.registration_options().new_team {
                    return Err(DomainError::invalid_transition(
                        "new team registration is not available",
                    ));
                }
                self.restart(EntryKind::NewTeam)
            }
            A::TeamInfoAdded { name, shift } => {
                self.require_open(EntryKind::NewTeam)?;
                let tournament = self.require_tournament()?;
                validate_team_form(&name, shift.as_deref(), tournament).into_result()?;
                let shift = shift.or_else(|| tournament.default_shift().map(str::to_string));
                Self {
                    team_name: Some(name.trim().to_string()),
                    shift,
                    ..self.clone()
                }
            }
            A::NewTeamBowlerInfoAdded(details) => {
                self.require_open(EntryKind::NewTeam)?;
                if self.team_name.is_none() {
                    return Err(DomainError::invalid_transition(
                        "team details must be entered before bowlers",
                    ));
                }
                let tournament = self.require_tournament()?;
                if self.bowlers.len() >= tournament.team_size() {
                    return Err(DomainError::validation(format!(
                        "a team has at most {} bowlers",
                        tournament.team_size()
                    )));
                }
                validate_bowler(&details, tournament, false).into_result()?;
                self.push_bowler(next_position(&self.bowlers), details)
            }
            A::NewTeamBowlerUpdated { index, details } => {
                self.require_open(EntryKind::NewTeam)?;
                validate_bowler(&details, self.require_tournament()?, false).into_result()?;
                self.replace_bowler(index, details)?
            }
            A::NewTeamPartnersSelected { chosen, partner } => {
                self.require_open(EntryKind::NewTeam)?;
                self.with_partners(chosen, partner)?
            }
            A::NewTeamEntryCompleted => self.complete(EntryKind::NewTeam)?,

            A::JoinTeamRegistrationInitiated(team) => {
                let tournament = self.require_tournament()?;
                if !tournament.registration_options().join_team {
                    return Err(DomainError::invalid_transition(
                        "joining a team is not available",
                    ));
                }
                if team.open_positions(tournament.team_size()).is_empty() {
                    return Err(DomainError::validation(format!(
                        "team {} is already full",
                        team.name
                    )));
                }
                Self {
                    team: Some(team),
                    ..self.restart(EntryKind::JoinTeam)
                }
            }
            A::ExistingTeamBowlerInfoAdded(details) => {
                self.require_open(EntryKind::JoinTeam)?;
                let tournament = self.require_tournament()?;
                validate_bowler(&details, tournament, false).into_result()?;
                let position = self
                    .team
                    .as_ref()
                    .and_then(|t| t.open_positions(tournament.team_size()).first().copied())
                    .ok_or_else(|| DomainError::validation("no open position on this team"))?;
                Self {
                    bowlers: vec![EntryBowler {
                        position,
                        details,
                        doubles_partner_num: None,
                    }],
                    ..self.clone()
                }
            }
            A::ExistingTeamBowlerEdited(details) => {
                self.require_open(EntryKind::JoinTeam)?;
                validate_bowler(&details, self.require_tournament()?, false).into_result()?;
                self.replace_bowler(0, details)?
            }
            A::SubmitJoinTeamCompleted => self.complete(EntryKind::JoinTeam)?,

            A::NewSoloRegistrationInitiated => {
                let tournament = self.require_tournament()?;
                if !tournament.registration_options().solo {
                    return Err(DomainError::invalid_transition(
                        "solo registration is not available",
                    ));
                }
                self.restart(EntryKind::Solo)
            }
            A::SoloBowlerInfoAdded(details) => {
                self.require_open(EntryKind::Solo)?;
                let details = self.solo_details(details)?;
                Self {
                    bowlers: vec![EntryBowler {
                        position: 1,
                        details,
                        doubles_partner_num: None,
                    }],
                    ..self.clone()
                }
            }
            A::SoloBowlerInfoUpdated(details) => {
                self.require_open(EntryKind::Solo)?;
                let details = self.solo_details(details)?;
                self.replace_bowler(0, details)?
            }
            A::SoloBowlerRegistrationCompleted => self.complete(EntryKind::Solo)?,

            A::NewPairRegistrationInitiated => {
                if !self.require_tournament()?.accepts_new_pairs() {
                    return Err(DomainError::invalid_transition(
                        "new pair registration is not available",
                    ));
                }
                self.restart(EntryKind::NewPair)
            }
            A::NewPairBowlerInfoAdded(details) => {
                self.require_open(EntryKind::NewPair)?;
                if self.bowlers.len() >= 2 {
                    return Err(DomainError::validation("a pair has exactly two bowlers"));
                }
                validate_bowler(&details, self.require_tournament()?, false).into_result()?;
                let next = self.push_bowler(next_position(&self.bowlers), details);
                if next.bowlers.len() == 2 {
                    next.with_partners(1, 2)?
                } else {
                    next
                }
            }
            A::NewPairBowlerUpdated { index, details } => {
                self.require_open(EntryKind::NewPair)?;
                validate_bowler(&details, self.require_tournament()?, false).into_result()?;
                self.replace_bowler(index, details)?
            }
            A::NewPairRegistrationCompleted => {
                if self.bowlers.len() != 2 {
                    return Err(DomainError::validation("a pair has exactly two bowlers"));
                }
                self.complete(EntryKind::NewPair)?
            }
        };

        debug!(kind = ?next.kind, bowlers = next.bowlers.len(), "Registration entry updated");
        Ok(next)
    }

    /// Submission body for a completed new-team entry.
    pub fn new_team_request(&self) -> Result<NewTeamRequest, DomainError> {
        self.require_completed(EntryKind::NewTeam)?;
        let name = self
            .team_name
            .as_deref()
            .ok_or_else(|| DomainError::validation("team name missing"))?;
        Ok(new_team_request(
            self.require_tournament()?,
            name,
            self.shift.as_deref(),
            &self.bowlers,
        ))
    }

    /// Team identifier and body for a completed join-team entry.
    pub fn join_team_request(&self) -> Result<(String, BowlerRequest), DomainError> {
        self.require_completed(EntryKind::JoinTeam)?;
        let team = self
            .team
            .as_ref()
            .ok_or_else(|| DomainError::validation("no team chosen"))?;
        let bowler = self
            .bowlers
            .first()
            .ok_or_else(|| DomainError::validation("bowler details missing"))?;
        Ok((
            team.identifier.clone(),
            bowler_request(self.require_tournament()?, bowler),
        ))
    }

    pub fn solo_request(&self) -> Result<BowlerRequest, DomainError> {
        self.require_completed(EntryKind::Solo)?;
        let bowler = self
            .bowlers
            .first()
            .ok_or_else(|| DomainError::validation("bowler details missing"))?;
        Ok(bowler_request(self.require_tournament()?, bowler))
    }

    pub fn pair_request(&self) -> Result<PairRequest, DomainError> {
        self.require_completed(EntryKind::NewPair)?;
        Ok(pair_request(self.require_tournament()?, &self.bowlers))
    }

    fn with_tournament(&self, tournament: Tournament) -> Self {
        let same = self
            .tournament
            .as_ref()
            .is_some_and(|t| t.identifier == tournament.identifier);
        if same {
            Self {
                tournament: Some(tournament),
                ..self.clone()
            }
        } else {
            Self {
                tournament: Some(tournament),
                ..Self::default()
            }
        }
    }

    fn restart(&self, kind: EntryKind) -> Self {
        Self {
            tournament: self.tournament.clone(),
            kind,
            ..Self::default()
        }
    }

    fn require_tournament(&self) -> Result<&Tournament, DomainError> {
        self.tournament
            .as_ref()
            .ok_or_else(|| DomainError::invalid_transition("tournament details not loaded"))
    }

    fn require_open(&self, kind: EntryKind) -> Result<(), DomainError> {
        if self.kind != kind {
            return Err(DomainError::invalid_transition(format!(
                "expected a {kind:?} registration, have {:?}",
                self.kind
            )));
        }
        if self.completed {
            return Err(DomainError::invalid_transition(
                "registration has already been completed",
            ));
        }
        Ok(())
    }

    fn require_completed(&self, kind: EntryKind) -> Result<(), DomainError> {
        if self.kind != kind || !self.completed {
            return Err(DomainError::invalid_transition(format!(
                "no completed {kind:?} registration"
            )));
        }
        Ok(())
    }

    fn complete(&self, kind: EntryKind) -> Result<Self, DomainError> {
        self.require_open(kind)?;
        if self.bowlers.is_empty() {
            return Err(DomainError::validation("add at least one bowler first"));
        }
        Ok(Self {
            completed: true,
            ..self.clone()
        })
    }

    fn solo_details(&self, mut details: BowlerDetails) -> Result<BowlerDetails, DomainError> {
        let tournament = self.require_tournament()?;
        if details.shift.is_none() {
            details.shift = tournament.default_shift().map(str::to_string);
        }
        let choose_shift = tournament.requires_shift_choice();
        validate_bowler(&details, tournament, choose_shift).into_result()?;
        Ok(details)
    }

    fn push_bowler(&self, position: u8, details: BowlerDetails) -> Self {
        let mut bowlers = self.bowlers.clone();
        bowlers.push(EntryBowler {
            position,
            details,
            doubles_partner_num: None,
        });
        Self {
            bowlers,
            ..self.clone()
        }
    }

    fn replace_bowler(&self, index: usize, details: BowlerDetails) -> Result<Self, DomainError> {
        let mut bowlers = self.bowlers.clone();
        let bowler = bowlers
            .get_mut(index)
            .ok_or_else(|| DomainError::validation(format!("no bowler at index {index}")))?;
        bowler.details = details;
        Ok(Self {
            bowlers,
            ..self.clone()
        })
    }

    /// Entry bowlers have no server ids yet, so positions stand in for ids.
    fn with_partners(&self, chosen: u8, partner: u8) -> Result<Self, DomainError> {
        let group = PartnerGroup::new(
            self.bowlers
                .iter()
                .map(|b| GroupMember {
                    id: BowlerId(i64::from(b.position)),
                    position: b.position,
                    partner_id: b.doubles_partner_num.map(|p| BowlerId(i64::from(p))),
                })
                .collect(),
        )?;
        let reconciled = reconcile(
            &group,
            BowlerId(i64::from(chosen)),
            BowlerId(i64::from(partner)),
        )?;

        let bowlers = self
            .bowlers
            .iter()
            .zip(reconciled.members())
            .map(|(bowler, member)| EntryBowler {
                doubles_partner_num: member.partner_id.and_then(|p| u8::try_from(p.0).ok()),
                ..bowler.clone()
            })
            .collect();
        Ok(Self {
            bowlers,
            ..self.clone()
        })
    }
}

fn next_position(bowlers: &[EntryBowler]) -> u8 {
    bowlers
        .iter()
        .map(|b| b.position)
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}
