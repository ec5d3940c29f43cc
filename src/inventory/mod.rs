//! In-memory rental inventory.
//!
//! Items live only for the lifetime of a menu session. The market price of a
//! new item is looked up when it is added, never entered by hand.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{InventoryItem, ItemKind};

/// Latest market price for an item code.
pub fn latest_price(_item_code: &str) -> u32 {
    24
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<String, InventoryItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, pricing it at the current market price.
    ///
    /// An existing item with the same code is replaced.
    pub fn add(
        &mut self,
        product_code: impl Into<String>,
        description: impl Into<String>,
        rental_price: impl Into<String>,
        kind: ItemKind,
    ) -> &InventoryItem {
        let product_code = product_code.into();
        let item = InventoryItem {
            market_price: latest_price(&product_code),
            product_code: product_code.clone(),
            description: description.into(),
            rental_price: rental_price.into(),
            kind,
        };
        debug!(product_code = %item.product_code, kind = ?item.kind, "Adding inventory item.");

        self.items.insert(product_code.clone(), item);
        &self.items[&product_code]
    }

    pub fn get(&self, product_code: &str) -> Option<&InventoryItem> {
        self.items.get(product_code)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
