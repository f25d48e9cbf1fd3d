//! API-shaped JSON fixtures.
//!
//! These mirror what the remote tournament API returns, so tests exercise the
//! same deserialization paths as production code.

use serde_json::{json, Value};

/// An active tournament with two shifts, one required and one optional
/// additional question, and a standard set of purchasable items.
pub fn tournament_json() -> Value {
    json!({
        "identifier": "pride-classic-2024",
        "name": "Pride Classic",
        "year": 2024,
        "state": "active",
        "registration_fee": 110,
        "early_registration_discount": 10,
        "late_registration_fee": 15,
        "registration_deadline": "2024-05-20",
        "start_date": "2024-05-24",
        "shifts": [
            {
                "identifier": "shift-fri",
                "name": "Friday",
                "capacity": 128,
                "requested_count": 20,
                "confirmed_count": 60,
                "permit_solo": true,
                "permit_joins": true,
                "permit_new_teams": true,
                "registration_types": {
                    "new_team": true,
                    "solo": true,
                    "join_team": true,
                    "new_pair": true
                }
            },
            {
                "identifier": "shift-sat",
                "name": "Saturday",
                "capacity": 128,
                "requested_count": 4,
                "confirmed_count": 100
            }
        ],
        "available_shifts": [
            {"identifier": "shift-fri", "name": "Friday"},
            {"identifier": "shift-sat", "name": "Saturday"}
        ],
        "config_items": [
            {"key": "team_size", "value": 4},
            {"key": "display_capacity", "value": true},
            {"key": "event_selection", "value": false}
        ],
        "additional_questions": {
            "shirt_size": {
                "label": "Shirt size",
                "order": 1,
                "validation": {"required": true}
            },
            "comment": {
                "label": "Anything else?",
                "order": 2,
                "validation": {"required": false}
            }
        },
        "purchasable_items": [
            {
                "identifier": "item-entry",
                "name": "Entry fee",
                "category": "ledger",
                "determination": "entry_fee",
                "value": 110
            },
            {
                "identifier": "item-sm-a",
                "name": "Scratch Masters",
                "category": "bowling",
                "determination": "single_use",
                "refinement": "division",
                "value": 60,
                "configuration": {"division": "A"}
            },
            {
                "identifier": "item-sm-b",
                "name": "Scratch Masters",
                "category": "bowling",
                "determination": "single_use",
                "refinement": "division",
                "value": 50,
                "configuration": {"division": "B"}
            },
            {
                "identifier": "item-raffle",
                "name": "Raffle ticket",
                "category": "product",
                "determination": "multi_use",
                "value": 5
            }
        ]
    })
}

/// Same tournament, forced into a different state.
pub fn tournament_in_state(state: &str) -> Value {
    let mut value = tournament_json();
    value["state"] = json!(state);
    value
}

/// A team with `count` bowlers (ids 101.., positions 1..), no partners set.
pub fn team_json(count: u8) -> Value {
    let bowlers: Vec<Value> = (1..=count)
        .map(|position| {
            json!({
                "id": 100 + i64::from(position),
                "identifier": format!("bowler-{position}"),
                "name": format!("Bowler {position}"),
                "position": position,
                "doubles_partner_id": null,
                "amount_due": "110"
            })
        })
        .collect();

    json!({
        "identifier": "team-alley-cats",
        "name": "Alley Cats",
        "shift": {"identifier": "shift-fri", "name": "Friday"},
        "shift_confirmed": false,
        "bowlers": bowlers
    })
}

/// Bowler form values that pass validation against [`tournament_json`].
pub fn bowler_details_json(first_name: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": "Tester",
        "usbc_id": "9876-54321",
        "birth_month": "7",
        "birth_day": "14",
        "email": format!("{}@example.test", first_name.to_lowercase()),
        "phone": "555-0199",
        "address1": "42 Lane Ave",
        "city": "Columbus",
        "state": "OH",
        "country": "US",
        "postal_code": "43210",
        "additional_answers": {"shirt_size": "XL"}
    })
}

/// Director account body as returned by `POST /login`.
pub fn director_user_json() -> Value {
    json!({
        "identifier": "director-1",
        "email": "director@example.test",
        "role": "director",
        "tournaments": [{"identifier": "pride-classic-2024", "name": "Pride Classic"}]
    })
}
