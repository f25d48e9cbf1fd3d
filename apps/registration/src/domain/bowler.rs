use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything a registrant types in about one bowler.
///
/// Values are kept as entered; validation decides whether they are usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BowlerDetails {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub usbc_id: String,
    pub igbo_id: String,
    pub birth_month: String,
    pub birth_day: String,
    pub email: String,
    pub phone: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    /// Answers to the tournament's additional questions, keyed by question name.
    pub additional_answers: BTreeMap<String, String>,
    /// Requested shift, for solo registrations.
    pub shift: Option<String>,
}

impl BowlerDetails {
    /// Name shown in rosters: nickname when given, else first name.
    pub fn display_name(&self) -> String {
        let first = if self.nickname.trim().is_empty() {
            self.first_name.trim()
        } else {
            self.nickname.trim()
        };
        format!("{} {}", first, self.last_name.trim())
    }

    pub fn answer(&self, question: &str) -> &str {
        self.additional_answers
            .get(question)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A bowler on a team or pair entry, with their slot and doubles partner slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryBowler {
    pub position: u8,
    pub details: BowlerDetails,
    /// Position of the doubles partner within the same entry.
    #[serde(default)]
    pub doubles_partner_num: Option<u8>,
}
