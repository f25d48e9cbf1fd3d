use registration_test_support::fixtures;

use crate::domain::bowler::BowlerDetails;
use crate::domain::entry::{EntryAction as A, EntryKind, RegistrationEntry};
use crate::domain::team::Team;
use crate::domain::tournament::Tournament;
use crate::errors::domain::DomainError;

fn tournament() -> Tournament {
    serde_json::from_value(fixtures::tournament_json()).unwrap()
}

fn bowler(name: &str) -> BowlerDetails {
    serde_json::from_value(fixtures::bowler_details_json(name)).unwrap()
}

fn team(count: u8) -> Team {
    serde_json::from_value(fixtures::team_json(count)).unwrap()
}

fn loaded() -> RegistrationEntry {
    RegistrationEntry::new()
        .apply(A::TournamentDetailsRetrieved(tournament()))
        .unwrap()
}

fn new_team_with(count: usize) -> RegistrationEntry {
    let mut entry = loaded()
        .apply(A::NewTeamRegistrationInitiated)
        .unwrap()
        .apply(A::TeamInfoAdded {
            name: " Alley Cats ".into(),
            shift: Some("shift-sat".into()),
        })
        .unwrap();
    for i in 0..count {
        entry = entry
            .apply(A::NewTeamBowlerInfoAdded(bowler(&format!("Bowler{i}"))))
            .unwrap();
    }
    entry
}

#[test]
fn new_team_flow_builds_submission() {
    let entry = new_team_with(4)
        .apply(A::NewTeamPartnersSelected {
            chosen: 1,
            partner: 3,
        })
        .unwrap()
        .apply(A::NewTeamEntryCompleted)
        .unwrap();

    assert_eq!(entry.kind(), EntryKind::NewTeam);
    assert_eq!(entry.team_name(), Some("Alley Cats"));
    let partners: Vec<_> = entry
        .bowlers()
        .iter()
        .map(|b| (b.position, b.doubles_partner_num))
        .collect();
    assert_eq!(
        partners,
        vec![(1, Some(3)), (2, Some(4)), (3, Some(1)), (4, Some(2))]
    );

    let request = entry.new_team_request().unwrap();
    assert_eq!(request.team.name, "Alley Cats");
    assert_eq!(request.team.shift_identifier.as_deref(), Some("shift-sat"));
    assert_eq!(request.team.bowlers_attributes.len(), 4);
    assert_eq!(request.team.bowlers_attributes[1].doubles_partner_num, Some(4));
}

#[test]
fn partner_reselection_repairs_whole_team() {
    let entry = new_team_with(4)
        .apply(A::NewTeamPartnersSelected {
            chosen: 1,
            partner: 3,
        })
        .unwrap()
        .apply(A::NewTeamPartnersSelected {
            chosen: 2,
            partner: 3,
        })
        .unwrap();
    let partners: Vec<_> = entry
        .bowlers()
        .iter()
        .map(|b| b.doubles_partner_num)
        .collect();
    assert_eq!(partners, vec![Some(4), Some(3), Some(2), Some(1)]);
}

#[test]
fn unknown_partner_position_is_precondition_error() {
    let err = new_team_with(3)
        .apply(A::NewTeamPartnersSelected {
            chosen: 1,
            partner: 4,
        })
        .unwrap_err();
    assert!(err.is_precondition());
}

#[test]
fn fifth_bowler_rejected() {
    let err = new_team_with(4)
        .apply(A::NewTeamBowlerInfoAdded(bowler("Extra")))
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn bowler_before_team_info_rejected() {
    let err = loaded()
        .apply(A::NewTeamRegistrationInitiated)
        .unwrap()
        .apply(A::NewTeamBowlerInfoAdded(bowler("Early")))
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition(_)));
}

#[test]
fn invalid_bowler_details_rejected() {
    let mut details = bowler("Incomplete");
    details.usbc_id.clear();
    let err = new_team_with(0)
        .apply(A::NewTeamBowlerInfoAdded(details))
        .unwrap_err();
    match err {
        DomainError::Validation(msg) => assert!(msg.contains("usbc_id"), "got: {msg}"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn team_form_requires_shift_choice_with_two_shifts() {
    let err = loaded()
        .apply(A::NewTeamRegistrationInitiated)
        .unwrap()
        .apply(A::TeamInfoAdded {
            name: "No Shift".into(),
            shift: None,
        })
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn bowler_update_keeps_position_and_partner() {
    let entry = new_team_with(2)
        .apply(A::NewTeamPartnersSelected {
            chosen: 2,
            partner: 1,
        })
        .unwrap()
        .apply(A::NewTeamBowlerUpdated {
            index: 1,
            details: bowler("Renamed"),
        })
        .unwrap();
    let second = &entry.bowlers()[1];
    assert_eq!(second.position, 2);
    assert_eq!(second.doubles_partner_num, Some(1));
    assert_eq!(second.details.first_name, "Renamed");

    assert!(entry
        .apply(A::NewTeamBowlerUpdated {
            index: 7,
            details: bowler("Nobody"),
        })
        .is_err());
}

#[test]
fn entry_is_not_mutated_by_apply() {
    let before = new_team_with(2);
    let snapshot = before.clone();
    let _ = before.apply(A::NewTeamPartnersSelected {
        chosen: 1,
        partner: 2,
    });
    assert_eq!(before, snapshot);
}

#[test]
fn join_team_takes_first_open_position() {
    let entry = loaded()
        .apply(A::JoinTeamRegistrationInitiated(team(3)))
        .unwrap()
        .apply(A::ExistingTeamBowlerInfoAdded(bowler("Joiner")))
        .unwrap()
        .apply(A::SubmitJoinTeamCompleted)
        .unwrap();

    assert_eq!(entry.bowlers()[0].position, 4);
    let (team_id, request) = entry.join_team_request().unwrap();
    assert_eq!(team_id, "team-alley-cats");
    assert_eq!(request.bowler.position, 4);
    assert_eq!(request.bowler.person_attributes.first_name, "Joiner");
}

#[test]
fn joining_full_team_rejected() {
    let err = loaded()
        .apply(A::JoinTeamRegistrationInitiated(team(4)))
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn solo_bowler_must_choose_shift_when_several() {
    let solo = loaded().apply(A::NewSoloRegistrationInitiated).unwrap();
    assert!(solo.apply(A::SoloBowlerInfoAdded(bowler("Solo"))).is_err());

    let mut details = bowler("Solo");
    details.shift = Some("shift-fri".into());
    let entry = solo
        .apply(A::SoloBowlerInfoAdded(details))
        .unwrap()
        .apply(A::SoloBowlerRegistrationCompleted)
        .unwrap();
    let request = entry.solo_request().unwrap();
    assert_eq!(request.bowler.shift_identifier.as_deref(), Some("shift-fri"));
}

#[test]
fn solo_shift_defaults_when_single_available() {
    let mut value = fixtures::tournament_json();
    value["available_shifts"] = serde_json::json!([{"identifier": "shift-fri", "name": "Friday"}]);
    let tournament: Tournament = serde_json::from_value(value).unwrap();

    let entry = RegistrationEntry::new()
        .apply(A::TournamentDetailsRetrieved(tournament))
        .unwrap()
        .apply(A::NewSoloRegistrationInitiated)
        .unwrap()
        .apply(A::SoloBowlerInfoAdded(bowler("Solo")))
        .unwrap();
    assert_eq!(entry.bowlers()[0].details.shift.as_deref(), Some("shift-fri"));
}

#[test]
fn new_pair_is_auto_paired() {
    let entry = loaded()
        .apply(A::NewPairRegistrationInitiated)
        .unwrap()
        .apply(A::NewPairBowlerInfoAdded(bowler("Left")))
        .unwrap()
        .apply(A::NewPairBowlerInfoAdded(bowler("Right")))
        .unwrap()
        .apply(A::NewPairRegistrationCompleted)
        .unwrap();

    let request = entry.pair_request().unwrap();
    assert_eq!(request.bowlers.len(), 2);
    assert_eq!(request.bowlers[0].doubles_partner_num, Some(2));
    assert_eq!(request.bowlers[1].doubles_partner_num, Some(1));
}

#[test]
fn new_pair_blocked_when_shift_disallows() {
    let mut value = fixtures::tournament_json();
    value["shifts"][0]["registration_types"]["new_pair"] = serde_json::json!(false);
    let tournament: Tournament = serde_json::from_value(value).unwrap();
    let err = RegistrationEntry::new()
        .apply(A::TournamentDetailsRetrieved(tournament))
        .unwrap()
        .apply(A::NewPairRegistrationInitiated)
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition(_)));
}

#[test]
fn registration_blocked_outside_open_states() {
    let tournament: Tournament =
        serde_json::from_value(fixtures::tournament_in_state("setup")).unwrap();
    let entry = RegistrationEntry::new()
        .apply(A::TournamentDetailsRetrieved(tournament))
        .unwrap();
    assert!(entry.apply(A::NewTeamRegistrationInitiated).is_err());
    assert!(entry.apply(A::NewSoloRegistrationInitiated).is_err());
}

#[test]
fn completed_entry_is_frozen() {
    let entry = new_team_with(1).apply(A::NewTeamEntryCompleted).unwrap();
    assert!(entry.is_completed());
    let err = entry
        .apply(A::NewTeamBowlerInfoAdded(bowler("Late")))
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition(_)));
}

#[test]
fn switching_tournament_resets_entry() {
    let entry = new_team_with(2);
    let mut other = fixtures::tournament_json();
    other["identifier"] = serde_json::json!("other-open");
    let other: Tournament = serde_json::from_value(other).unwrap();

    let reset = entry.apply(A::TournamentDetailsRetrieved(other)).unwrap();
    assert_eq!(reset.kind(), EntryKind::None);
    assert!(reset.bowlers().is_empty());

    let refreshed = entry
        .apply(A::TournamentDetailsRetrieved(tournament()))
        .unwrap();
    assert_eq!(refreshed.bowlers().len(), 2);
}

#[test]
fn submission_requires_completion() {
    let err = new_team_with(2).new_team_request().unwrap_err();
    assert!(matches!(err, DomainError::InvalidTransition(_)));
}
