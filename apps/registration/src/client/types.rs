//! Response and request bodies that only the HTTP layer deals with.

use serde::{Deserialize, Serialize};

use crate::domain::commerce::PurchasableItem;
use crate::domain::team::Team;
use crate::domain::tournament::TournamentRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub paid_at: Option<String>,
}

/// A registered bowler as seen on their own payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerRecord {
    pub identifier: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub nickname: String,
    pub tournament: TournamentRef,
    #[serde(default)]
    pub team_identifier: Option<String>,
    #[serde(default)]
    pub amount_due: i64,
    #[serde(default)]
    pub unpaid_purchases: Vec<Purchase>,
    #[serde(default)]
    pub paid_purchases: Vec<Purchase>,
}

impl BowlerRecord {
    pub fn unpaid_identifiers(&self) -> Vec<String> {
        self.unpaid_purchases
            .iter()
            .map(|p| p.identifier.clone())
            .collect()
    }
}

/// `GET /bowlers/{id}`: the bowler plus what they may still buy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlerCommerce {
    pub bowler: BowlerRecord,
    #[serde(default)]
    pub available_items: Vec<PurchasableItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBowler {
    pub identifier: String,
}

/// What a submitted registration produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Team(Team),
    Bowler(NewBowler),
    Pair(Vec<NewBowler>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeEntryCode {
    pub unique_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bowler_identifier: Option<String>,
}

/// Body for `POST /tournaments/{id}/free_entries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeEntryRequest {
    pub free_entry: FreeEntryCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordResetUser {
    pub email: String,
}

/// Body for `POST /password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordResetRequest {
    pub user: PasswordResetUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub reset_password_token: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Body for `PATCH /password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChangeRequest {
    pub user: PasswordChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body for `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub user: Credentials,
}
