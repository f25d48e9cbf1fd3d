//! Client-side form validation for bowler, team and roster forms.
//!
//! Every check reports all failing fields at once so the form can mark each
//! one; callers that only need pass/fail use [`ValidationReport::into_result`].

use std::collections::HashSet;

use time::{util::days_in_year_month, Month};
use unicode_normalization::UnicodeNormalization;

use crate::domain::bowler::BowlerDetails;
use crate::domain::roster::PartnerGroup;
use crate::domain::tournament::Tournament;
use crate::errors::domain::DomainError;

pub const TEAM_NAME_MAX_LEN: usize = 100;

/// Leap year used when checking a birthday, so Feb 29 is accepted.
const LEAP_YEAR: i32 = 2000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldRules {
    pub required: bool,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl FieldRules {
    pub const REQUIRED: FieldRules = FieldRules {
        required: true,
        min: None,
        max: None,
    };
    pub const OPTIONAL: FieldRules = FieldRules {
        required: false,
        min: None,
        max: None,
    };

    pub const fn range(min: i64, max: i64) -> Self {
        FieldRules {
            required: true,
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Check one raw form value against its rules.
///
/// Empty optional values pass; numeric bounds require the value to parse.
pub fn check_validity(value: &str, rules: &FieldRules) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return !rules.required;
    }
    if rules.min.is_none() && rules.max.is_none() {
        return true;
    }
    let Ok(number) = trimmed.parse::<i64>() else {
        return false;
    };
    rules.min.map_or(true, |min| number >= min) && rules.max.map_or(true, |max| number <= max)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    fn check(&mut self, field: &str, value: &str, rules: &FieldRules, message: &str) {
        if !check_validity(value, rules) {
            self.push(field, message);
        }
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let fields: Vec<&str> = self.errors.iter().map(|e| e.field.as_str()).collect();
        Err(DomainError::validation(format!(
            "invalid fields: {}",
            fields.join(", ")
        )))
    }
}

/// Normalize an email address for comparison: trim, NFKC, lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// Loose shape check; the server does the real verification.
pub fn is_plausible_email(email: &str) -> bool {
    let normalized = normalize_email(email);
    let mut parts = normalized.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !normalized.contains(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// Whether `day` exists in `month` of a leap year.
pub fn is_valid_birthday(month: &str, day: &str) -> bool {
    let (Ok(month), Ok(day)) = (month.trim().parse::<u8>(), day.trim().parse::<u8>()) else {
        return false;
    };
    let Ok(month) = Month::try_from(month) else {
        return false;
    };
    day >= 1 && day <= days_in_year_month(LEAP_YEAR, month)
}

/// Validate one bowler's details against the standard fields and the
/// tournament's additional questions.
pub fn validate_bowler(
    details: &BowlerDetails,
    tournament: &Tournament,
    include_shift: bool,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let required = FieldRules::REQUIRED;

    report.check("first_name", &details.first_name, &required, "First name is required");
    report.check("last_name", &details.last_name, &required, "Last name is required");
    report.check("usbc_id", &details.usbc_id, &required, "USBC ID is required");
    report.check(
        "birth_month",
        &details.birth_month,
        &FieldRules::range(1, 12),
        "Birth month must be 1-12",
    );
    report.check(
        "birth_day",
        &details.birth_day,
        &FieldRules::range(1, 31),
        "Birth day must be 1-31",
    );
    if !report.has_error("birth_month")
        && !report.has_error("birth_day")
        && !is_valid_birthday(&details.birth_month, &details.birth_day)
    {
        report.push("birth_day", "That day doesn't exist in the chosen month");
    }
    report.check("email", &details.email, &required, "Email address is required");
    if !report.has_error("email") && !is_plausible_email(&details.email) {
        report.push("email", "Email address doesn't look right");
    }
    report.check("phone", &details.phone, &required, "Phone number is required");
    report.check("address1", &details.address1, &required, "Address is required");
    report.check("city", &details.city, &required, "City is required");
    report.check("state", &details.state, &required, "State/Province is required");
    report.check("country", &details.country, &required, "Country is required");
    report.check("postal_code", &details.postal_code, &required, "ZIP/Postal code is required");

    for (name, question) in tournament.ordered_questions() {
        let rules = if question.validation.required {
            FieldRules::REQUIRED
        } else {
            FieldRules::OPTIONAL
        };
        report.check(
            name,
            details.answer(name),
            &rules,
            &format!("{} is required", question.label),
        );
    }

    if include_shift {
        let shift = details.shift.as_deref().unwrap_or("");
        if shift.trim().is_empty() {
            report.push("shift", "Choose a shift");
        } else if !tournament.has_shift(shift) {
            report.push("shift", "Unknown shift");
        }
    }

    report
}

/// Validate the new-team form. Shift is only required when there's a choice.
pub fn validate_team_form(
    name: &str,
    shift: Option<&str>,
    tournament: &Tournament,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let trimmed = name.trim();
    if trimmed.is_empty() {
        report.push("team_name", "Every team needs a good name!");
    } else if trimmed.chars().count() > TEAM_NAME_MAX_LEN {
        report.push(
            "team_name",
            format!("Team name is limited to {TEAM_NAME_MAX_LEN} characters"),
        );
    }

    if tournament.requires_shift_choice() {
        match shift.map(str::trim) {
            None | Some("") => report.push("shift", "Choose a shift"),
            Some(s) if !tournament.has_shift(s) => report.push("shift", "Unknown shift"),
            Some(_) => {}
        }
    }
    report
}

/// Roster positions must be distinct and within `1..=team_size`.
pub fn validate_positions(group: &PartnerGroup, team_size: usize) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen = HashSet::with_capacity(group.len());
    for member in group.members() {
        let position = usize::from(member.position);
        if position == 0 || position > team_size {
            report.push(
                format!("position[{}]", member.id),
                format!("Position must be between 1 and {team_size}"),
            );
        } else if !seen.insert(member.position) {
            report.push(
                format!("position[{}]", member.id),
                format!("Position {} is used more than once", member.position),
            );
        }
    }
    report
}
