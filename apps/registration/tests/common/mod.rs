#![allow(dead_code)]

// tests/common/mod.rs
use registration::domain::bowler::BowlerDetails;
use registration::domain::team::Team;
use registration::domain::tournament::Tournament;
use registration_test_support::{fixtures, unique_helpers::unique_email};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    registration_test_support::logging::init();
}

pub fn tournament() -> Tournament {
    serde_json::from_value(fixtures::tournament_json()).expect("tournament fixture")
}

pub fn team(count: u8) -> Team {
    serde_json::from_value(fixtures::team_json(count)).expect("team fixture")
}

/// Valid bowler details with an email no other test uses.
pub fn bowler(first_name: &str) -> BowlerDetails {
    let mut details: BowlerDetails =
        serde_json::from_value(fixtures::bowler_details_json(first_name)).expect("bowler fixture");
    details.email = unique_email(&first_name.to_lowercase());
    details
}

/// Serve the tournament fixture at `GET /tournaments/{identifier}`.
pub async fn mount_tournament(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/tournaments/pride-classic-2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::tournament_json()))
        .mount(server)
        .await;
}
