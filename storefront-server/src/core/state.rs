use std::sync::Arc;
use std::time::Duration;

use crate::core::Config;
use crate::db::repository::{ExtraRepository, OrderRepository, ProductRepository};
use crate::db::store::StoreDb;
use crate::payment::{MockProcessor, PaymentProcessor, StripeProcessor};
use crate::tracking::StatusWatcher;

/// Shared server state handed to every handler
///
/// Cloning is shallow; everything inside is either `Copy`-ish config
/// or behind an `Arc`.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | Immutable runtime configuration |
/// | store | Embedded document store (redb) |
/// | processor | Payment intent boundary |
/// | watcher | Order status polling |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub store: StoreDb,
    pub processor: Arc<dyn PaymentProcessor>,
    pub watcher: StatusWatcher,
}

impl ServerState {
    /// Initialize state from configuration: work directory, database
    /// file, payment processor, status watcher.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be created;
    /// the server has nothing to serve without them.
    pub fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let store = StoreDb::open(config.database_path()).expect("Failed to open database");

        let processor: Arc<dyn PaymentProcessor> = Arc::new(StripeProcessor::new(
            config.stripe_api_url.clone(),
            config.stripe_secret_key.clone(),
        ));

        Self::assemble(config.clone(), store, processor)
    }

    /// In-memory state with a recording payment mock, for tests
    pub fn for_testing() -> (Self, Arc<MockProcessor>) {
        let mut config = Config::with_overrides("/tmp/storefront-test", 0);
        // Tight polling so watcher-backed tests finish quickly
        config.poll_interval_secs = 1;
        let store = StoreDb::open_in_memory().expect("Failed to open in-memory database");
        let mock = Arc::new(MockProcessor::new());
        let state = Self::assemble(config, store, mock.clone());
        (state, mock)
    }

    fn assemble(config: Config, store: StoreDb, processor: Arc<dyn PaymentProcessor>) -> Self {
        let watcher = StatusWatcher::new(
            OrderRepository::new(store.clone()),
            Duration::from_secs(config.poll_interval_secs),
        );
        Self {
            config,
            store,
            processor,
            watcher,
        }
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.store.clone())
    }

    pub fn extras(&self) -> ExtraRepository {
        ExtraRepository::new(self.store.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.store.clone())
    }
}
