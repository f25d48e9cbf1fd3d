//! Tournament details as served by the remote API, plus the derived rules the
//! registration flows and director screens depend on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::commerce::{ItemCategory, PurchasableItem};
use crate::domain::payload::NewPurchasableItem;
use crate::errors::domain::DomainError;

/// Team size assumed when the tournament doesn't configure one.
pub const DEFAULT_TEAM_SIZE: usize = 4;

/// Ledger determinations a director may create once each.
pub const LEDGER_TYPES: [&str; 3] = ["entry_fee", "late_fee", "early_discount"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    Setup,
    Testing,
    Demo,
    Active,
    Closed,
}

impl TournamentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentState::Setup => "setup",
            TournamentState::Testing => "testing",
            TournamentState::Demo => "demo",
            TournamentState::Active => "active",
            TournamentState::Closed => "closed",
        }
    }
}

/// Director-initiated state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentAction {
    Test,
    Demonstrate,
    Open,
    Close,
    Reset,
}

/// Resulting state of applying `action` in `state`.
pub fn next_state(
    state: TournamentState,
    action: TournamentAction,
) -> Result<TournamentState, DomainError> {
    use TournamentAction as A;
    use TournamentState as S;

    match (state, action) {
        (S::Setup, A::Test) => Ok(S::Testing),
        (S::Setup, A::Demonstrate) => Ok(S::Demo),
        (S::Testing, A::Open) => Ok(S::Active),
        (S::Active, A::Close) => Ok(S::Closed),
        (S::Testing | S::Demo, A::Reset) => Ok(S::Setup),
        (state, action) => Err(DomainError::invalid_transition(format!(
            "cannot {action:?} a tournament in {} state",
            state.as_str()
        ))),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationTypes {
    pub new_team: bool,
    pub solo: bool,
    pub join_team: bool,
    pub new_pair: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub requested_count: u32,
    #[serde(default)]
    pub confirmed_count: u32,
    #[serde(default = "permitted")]
    pub permit_solo: bool,
    #[serde(default = "permitted")]
    pub permit_joins: bool,
    #[serde(default = "permitted")]
    pub permit_new_teams: bool,
    #[serde(default)]
    pub registration_types: RegistrationTypes,
}

fn permitted() -> bool {
    true
}

impl Shift {
    /// Requested entries shown against capacity: never more than the unconfirmed room.
    pub fn display_requested_count(&self) -> u32 {
        self.requested_count
            .min(self.capacity.saturating_sub(self.confirmed_count))
    }
}

/// Config values arrive as bools, numbers or strings depending on the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl ConfigValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Flag(b) => *b,
            ConfigValue::Number(n) => *n != 0,
            ConfigValue::Text(s) => {
                let s = s.trim();
                !s.is_empty() && s != "false" && s != "0"
            }
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Number(n) => Some(*n),
            ConfigValue::Text(s) => s.trim().parse().ok(),
            ConfigValue::Flag(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub key: String,
    pub value: ConfigValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionRules {
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalQuestion {
    pub label: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default, alias = "validation_rules")]
    pub validation: QuestionRules,
}

/// Identifier and name only, as embedded in users, bowlers and teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentRef {
    pub identifier: String,
    #[serde(default)]
    pub name: String,
}

/// Which registration paths the public landing page offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationOptions {
    pub solo: bool,
    pub join_team: bool,
    pub new_team: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub state: TournamentState,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default)]
    pub available_shifts: Vec<Shift>,
    #[serde(default)]
    pub config_items: Vec<ConfigItem>,
    #[serde(default)]
    pub additional_questions: BTreeMap<String, AdditionalQuestion>,
    #[serde(default)]
    pub purchasable_items: Vec<PurchasableItem>,
    #[serde(default)]
    pub registration_fee: Option<i64>,
    #[serde(default)]
    pub early_registration_discount: Option<i64>,
    #[serde(default)]
    pub late_registration_fee: Option<i64>,
    #[serde(default)]
    pub registration_deadline: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub early_registration_ends: Option<String>,
    #[serde(default)]
    pub late_fee_applies_at: Option<String>,
}

impl Tournament {
    pub fn accepts_registrations(&self) -> bool {
        matches!(
            self.state,
            TournamentState::Testing | TournamentState::Demo | TournamentState::Active
        )
    }

    pub fn registration_options(&self) -> RegistrationOptions {
        if !self.accepts_registrations() {
            return RegistrationOptions {
                solo: false,
                join_team: false,
                new_team: false,
            };
        }
        match self.shifts.first() {
            None => RegistrationOptions {
                solo: true,
                join_team: true,
                new_team: true,
            },
            Some(shift) => RegistrationOptions {
                solo: shift.permit_solo,
                join_team: shift.permit_joins,
                new_team: shift.permit_new_teams,
            },
        }
    }

    pub fn accepts_new_pairs(&self) -> bool {
        self.accepts_registrations()
            && self
                .shifts
                .first()
                .map_or(true, |shift| shift.registration_types.new_pair)
    }

    pub fn config_value(&self, key: &str) -> Option<&ConfigValue> {
        self.config_items
            .iter()
            .find(|item| item.key == key)
            .map(|item| &item.value)
    }

    pub fn config_flag(&self, key: &str) -> bool {
        self.config_value(key).is_some_and(ConfigValue::is_truthy)
    }

    pub fn team_size(&self) -> usize {
        self.config_value("team_size")
            .and_then(ConfigValue::as_integer)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_TEAM_SIZE)
    }

    /// Identifier of the only available shift, when there is no real choice.
    pub fn default_shift(&self) -> Option<&str> {
        match self.available_shifts.as_slice() {
            [only] => Some(only.identifier.as_str()),
            _ => None,
        }
    }

    /// Whether registrants must pick a shift themselves.
    pub fn requires_shift_choice(&self) -> bool {
        self.available_shifts.len() > 1
    }

    pub fn has_shift(&self, identifier: &str) -> bool {
        self.shifts
            .iter()
            .chain(self.available_shifts.iter())
            .any(|s| s.identifier == identifier)
    }

    /// Additional questions in display order.
    pub fn ordered_questions(&self) -> Vec<(&str, &AdditionalQuestion)> {
        let mut questions: Vec<_> = self
            .additional_questions
            .iter()
            .map(|(name, q)| (name.as_str(), q))
            .collect();
        questions.sort_by_key(|(_, q)| q.order);
        questions
    }

    /// Questions may be attached until registration opens.
    pub fn accepts_new_questions(&self) -> bool {
        !matches!(self.state, TournamentState::Active | TournamentState::Closed)
    }

    /// Purchasable items may be created outside of live registration.
    pub fn accepts_new_items(&self) -> bool {
        !matches!(self.state, TournamentState::Active | TournamentState::Closed)
    }

    /// Ledger determinations a director can still add.
    pub fn available_ledger_types(&self) -> Vec<&'static str> {
        let event_selection = self.config_flag("event_selection");
        let used: Vec<&str> = self
            .purchasable_items
            .iter()
            .filter(|item| item.is_ledger())
            .map(|item| item.determination.as_str())
            .collect();

        let mut types: Vec<&'static str> = LEDGER_TYPES
            .iter()
            .copied()
            .filter(|t| event_selection || !used.contains(t))
            .collect();
        if event_selection {
            types.push("bundle_discount");
        }
        types
    }

    /// Rules a new purchasable item must satisfy before it is sent.
    pub fn check_new_item(&self, item: &NewPurchasableItem) -> Result<(), DomainError> {
        if !self.accepts_new_items() {
            return Err(DomainError::invalid_transition(format!(
                "items can't be added to a tournament in {} state",
                self.state.as_str()
            )));
        }
        if item.name.trim().is_empty() {
            return Err(DomainError::validation("item name is required"));
        }
        if item.category == ItemCategory::Ledger
            && !self
                .available_ledger_types()
                .contains(&item.determination.as_str())
        {
            return Err(DomainError::validation(format!(
                "ledger item {} is not available",
                item.determination
            )));
        }
        Ok(())
    }
}
