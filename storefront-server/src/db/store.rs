//! redb-based document store
//!
//! One table per collection, JSON-serialized values keyed by record
//! id. This is the whole persistence boundary: `get_all`, `get`,
//! `put`, `delete`, plus order-code lookups layered on top by the
//! repositories.
//!
//! # Tables
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `products` | product id | `Product` |
//! | `extras` | extra id | `Extra` |
//! | `orders` | order id | `Order` |
//! | `cart` | slot name | `Vec<CartItem>` |
//! | `settings` | setting name | JSON value |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate`: once `commit()`
//! returns the write survives power loss, and the file is always in
//! a consistent state (copy-on-write with atomic pointer swap).

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// A named collection backed by one redb table
#[derive(Clone, Copy)]
pub struct Collection {
    name: &'static str,
    def: TableDefinition<'static, &'static str, &'static [u8]>,
}

impl Collection {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            def: TableDefinition::new(name),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Catalog products, mutated by administrative edits only
pub const PRODUCTS: Collection = Collection::new("products");
/// Global extras, matched from cart items by name
pub const EXTRAS: Collection = Collection::new("extras");
/// Orders, append-only except for the status field
pub const ORDERS: Collection = Collection::new("orders");
/// In-progress cart line lists, so a restart can resume a cart
pub const CART: Collection = Collection::new("cart");
/// Branding and other small admin settings
pub const SETTINGS: Collection = Collection::new("settings");

const ALL_COLLECTIONS: [Collection; 5] = [PRODUCTS, EXTRAS, ORDERS, CART, SETTINGS];

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Document store backed by redb
#[derive(Clone)]
pub struct StoreDb {
    db: Arc<Database>,
}

impl StoreDb {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open an in-memory database (tests, ephemeral dev runs)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        // Create all tables up front so reads never hit a missing table
        let write_txn = db.begin_write()?;
        for collection in ALL_COLLECTIONS {
            let _ = write_txn.open_table(collection.def)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Fetch every record in a collection
    pub fn get_all<T: DeserializeOwned>(&self, collection: Collection) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(collection.def)?;
        let mut records = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            records.push(serde_json::from_slice(value.value())?);
        }
        Ok(records)
    }

    /// Fetch one record by key
    pub fn get<T: DeserializeOwned>(
        &self,
        collection: Collection,
        key: &str,
    ) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(collection.def)?;
        match table.get(key)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Insert or replace a record
    pub fn put<T: Serialize>(
        &self,
        collection: Collection,
        key: &str,
        value: &T,
    ) -> StorageResult<()> {
        let json = serde_json::to_vec(value)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(collection.def)?;
            table.insert(key, json.as_slice())?;
        }
        write_txn.commit()?;
        tracing::debug!(collection = collection.name(), key, "record written");
        Ok(())
    }

    /// Delete a record; returns whether it existed
    pub fn delete(&self, collection: Collection, key: &str) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(collection.def)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        tracing::debug!(collection = collection.name(), key, existed, "record deleted");
        Ok(existed)
    }

    /// Scan a collection for records matching `predicate`
    ///
    /// Used for order-code lookups; collections here are small enough
    /// that a table scan is the honest implementation.
    pub fn find<T, F>(&self, collection: Collection, mut predicate: F) -> StorageResult<Vec<T>>
    where
        T: DeserializeOwned,
        F: FnMut(&T) -> bool,
    {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(collection.def)?;
        let mut matches = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let record: T = serde_json::from_slice(value.value())?;
            if predicate(&record) {
                matches.push(record);
            }
        }
        Ok(matches)
    }
}
