//! Purchasable items and the bowler's cart.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Ledger,
    Bowling,
    Product,
    Banquet,
    Sanction,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchasableItem {
    pub identifier: String,
    pub name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub determination: String,
    #[serde(default)]
    pub refinement: Option<String>,
    /// Whole dollars; discounts are positive and subtracted by the server.
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub configuration: serde_json::Map<String, serde_json::Value>,
}

impl PurchasableItem {
    pub fn is_ledger(&self) -> bool {
        self.category == ItemCategory::Ledger
    }

    pub fn is_multi_use(&self) -> bool {
        self.determination == "multi_use"
    }

    pub fn is_division(&self) -> bool {
        self.refinement.as_deref() == Some("division")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub item: PurchasableItem,
    pub quantity: u32,
}

/// Items a bowler has picked but not yet paid for.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemQuantity {
    pub identifier: String,
    pub quantity: u32,
}

/// Body for `POST /bowlers/{id}/purchase_details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseDetails {
    pub purchase_identifiers: Vec<String>,
    pub purchasable_items: Vec<ItemQuantity>,
    pub expected_total: i64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, identifier: &str) -> u32 {
        self.lines
            .iter()
            .find(|l| l.item.identifier == identifier)
            .map_or(0, |l| l.quantity)
    }

    /// Cart with `item` added.
    ///
    /// Single-use items are capped at one, multi-use items accumulate, and a
    /// division choice replaces any other division of the same item name.
    pub fn add(&self, item: &PurchasableItem) -> Result<Cart, DomainError> {
        if item.is_ledger() {
            return Err(DomainError::validation(format!(
                "ledger item {} is applied by the server, not selected",
                item.identifier
            )));
        }

        let mut lines = self.lines.clone();
        if item.is_division() {
            lines.retain(|l| !(l.item.is_division() && l.item.name == item.name));
        }

        match lines
            .iter_mut()
            .find(|l| l.item.identifier == item.identifier)
        {
            Some(line) if item.is_multi_use() => line.quantity = line.quantity.saturating_add(1),
            Some(_) => {}
            None => lines.push(CartLine {
                item: item.clone(),
                quantity: 1,
            }),
        }

        debug!(item = %item.identifier, "Item added to cart");
        Ok(Cart { lines })
    }

    /// Cart with one unit of `identifier` removed.
    pub fn remove(&self, identifier: &str) -> Cart {
        let mut lines = self.lines.clone();
        if let Some(pos) = lines.iter().position(|l| l.item.identifier == identifier) {
            if lines[pos].quantity > 1 {
                lines[pos].quantity -= 1;
            } else {
                lines.remove(pos);
            }
        }
        Cart { lines }
    }

    /// Sum of selected items.
    pub fn items_total(&self) -> i64 {
        self.lines
            .iter()
            .map(|l| l.item.value.saturating_mul(i64::from(l.quantity)))
            .sum()
    }

    /// Amount due: outstanding ledger balance plus selected items.
    pub fn total(&self, ledger_due: i64) -> i64 {
        ledger_due.saturating_add(self.items_total())
    }

    pub fn purchase_details(
        &self,
        unpaid_purchases: &[String],
        ledger_due: i64,
    ) -> PurchaseDetails {
        PurchaseDetails {
            purchase_identifiers: unpaid_purchases.to_vec(),
            purchasable_items: self
                .lines
                .iter()
                .map(|l| ItemQuantity {
                    identifier: l.item.identifier.clone(),
                    quantity: l.quantity,
                })
                .collect(),
            expected_total: self.total(ledger_due),
        }
    }
}
