//! Domain layer: pure registration types and rules, no I/O.

pub mod bowler;
pub mod commerce;
pub mod doubles;
pub mod entry;
pub mod payload;
pub mod roster;
pub mod roster_form;
pub mod team;
pub mod tournament;
pub mod validation;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_entry;
#[cfg(test)]
mod tests_props_doubles;

// Re-exports for ergonomics
pub use bowler::{BowlerDetails, EntryBowler};
pub use commerce::{Cart, ItemCategory, PurchasableItem, PurchaseDetails};
pub use doubles::{is_consistent, partner_of, reconcile, unpaired};
pub use entry::{EntryAction, EntryKind, RegistrationEntry};
pub use roster::{BowlerId, GroupMember, PartnerGroup, MAX_GROUP_SIZE};
pub use roster_form::RosterForm;
pub use team::Team;
pub use tournament::{next_state, Tournament, TournamentAction, TournamentState};
pub use validation::{check_validity, validate_bowler, FieldRules, ValidationReport};
