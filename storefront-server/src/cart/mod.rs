//! Shopping cart aggregator
//!
//! Holds an ordered list of line items and merges duplicates keyed by
//! (product id, extras-as-set). The cart is an explicit handle passed
//! to whoever needs it; there is no ambient singleton. Every mutation
//! persists the full line list through the injected [`CartStore`] so
//! a restart resumes an in-progress cart.
//!
//! Store write failures are logged and swallowed: losing a cart write
//! degrades resume-after-restart, not the current interaction.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use shared::models::CartItem;

use crate::db::store::{CART, StorageResult, StoreDb};

/// Key the whole line list is stored under
const CART_KEY: &str = "items";

/// Durable backing for a cart's line list
pub trait CartStore: Send + Sync {
    fn load(&self) -> StorageResult<Vec<CartItem>>;
    fn save(&self, items: &[CartItem]) -> StorageResult<()>;
}

/// Cart store backed by the redb settings-style `cart` table.
///
/// No HTTP route constructs this; the server consolidates checkout
/// lines through [`MemoryCartStore`]. It exists for embedders that
/// keep a cart alive across process restarts.
#[derive(Clone)]
pub struct RedbCartStore {
    store: StoreDb,
}

impl RedbCartStore {
    pub fn new(store: StoreDb) -> Self {
        Self { store }
    }
}

impl CartStore for RedbCartStore {
    fn load(&self) -> StorageResult<Vec<CartItem>> {
        Ok(self.store.get(CART, CART_KEY)?.unwrap_or_default())
    }

    fn save(&self, items: &[CartItem]) -> StorageResult<()> {
        self.store.put(CART, CART_KEY, &items.to_vec())
    }
}

/// In-memory cart store (tests, per-request consolidation)
#[derive(Default)]
pub struct MemoryCartStore {
    items: Mutex<Vec<CartItem>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> StorageResult<Vec<CartItem>> {
        Ok(self.items.lock().map(|i| i.clone()).unwrap_or_default())
    }

    fn save(&self, items: &[CartItem]) -> StorageResult<()> {
        if let Ok(mut slot) = self.items.lock() {
            *slot = items.to_vec();
        }
        Ok(())
    }
}

/// The cart aggregator
pub struct Cart {
    items: Vec<CartItem>,
    store: Arc<dyn CartStore>,
}

impl Cart {
    /// Open a cart, resuming whatever the store last saw
    pub fn open(store: Arc<dyn CartStore>) -> Self {
        let items = match store.load() {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load cart, starting empty");
                Vec::new()
            }
        };
        Self { items, store }
    }

    /// Add a line item, merging with an existing line whose product
    /// and extras-set match; merging only increments quantity.
    /// Insertion order of all other lines is preserved.
    pub fn add(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.matches(&item.product_id, &item.extras))
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
        self.persist();
    }

    /// Remove every line matching (product id, extras-set). Removing
    /// a line that is not there is fine.
    pub fn remove(&mut self, product_id: &str, extras: &[String]) {
        self.items.retain(|item| !item.matches(product_id, extras));
        self.persist();
    }

    /// Set the quantity of the matching line. Values below 1 are
    /// ignored; the quantity floor is 1 and removal is a separate,
    /// explicit action.
    pub fn update_quantity(&mut self, product_id: &str, extras: &[String], quantity: u32) {
        if quantity < 1 {
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.matches(product_id, extras))
        {
            item.quantity = quantity;
            self.persist();
        }
    }

    /// Empty the cart (checkout finalization)
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines, saturating
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of price × quantity across all lines
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.items) {
            tracing::warn!(error = %e, lines = self.items.len(), "Failed to persist cart");
        }
    }
}
