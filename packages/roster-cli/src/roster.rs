//! Applies doubles choices to a saved team and builds the director update body.

use registration::domain::payload::{team_update_request, TeamUpdateRequest};
use registration::domain::team::Team;
use registration::domain::validation::{validate_positions, FieldError};
use registration::{reconcile, BowlerId, DomainError};
use tracing::debug;

/// Parse `A:B` into the two bowler ids to pair.
pub fn parse_pair(raw: &str) -> Result<(BowlerId, BowlerId), String> {
    let (a, b) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected CHOSEN:PARTNER, got '{raw}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<i64>()
            .map(BowlerId)
            .map_err(|_| format!("'{s}' is not a bowler id"))
    };
    Ok((parse(a)?, parse(b)?))
}

#[derive(Debug)]
pub enum Outcome {
    Payload(TeamUpdateRequest),
    Invalid(Vec<FieldError>),
}

/// Apply each pairing in order, then check positions against `team_size`.
pub fn build_update(
    team: &Team,
    pairs: &[(BowlerId, BowlerId)],
    team_size: usize,
) -> Result<Outcome, DomainError> {
    let mut group = team.partner_group()?;
    for (chosen, partner) in pairs {
        group = reconcile(&group, *chosen, *partner)?;
        debug!(%chosen, %partner, "Applied pairing");
    }

    let report = validate_positions(&group, team_size);
    if !report.is_valid() {
        return Ok(Outcome::Invalid(report.errors().to_vec()));
    }
    let shift = team.shift.as_ref().map(|s| s.identifier.as_str());
    Ok(Outcome::Payload(team_update_request(&team.name, shift, &group)))
}
