//! Order status tracking
//!
//! Polls the order store for a given pickup code and publishes a
//! [`StatusChange`] event whenever the observed status differs from
//! the last one seen. One watcher task per watched code; dropping the
//! [`WatchHandle`] cancels the task. Watchers stop on their own once
//! the order reaches a terminal status.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::models::OrderStatus;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::db::repository::OrderRepository;

/// Published when a watched order's status changes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub code: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Change detector for one order's status stream.
///
/// `observe` compares against the last status seen and reports a
/// change at most once per actual transition. The first observation
/// seeds the baseline and never reports.
#[derive(Debug)]
pub struct StatusProbe {
    code: String,
    last: Option<OrderStatus>,
}

impl StatusProbe {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            last: None,
        }
    }

    pub fn observe(&mut self, current: OrderStatus) -> Option<StatusChange> {
        let change = match self.last {
            Some(last) if last != current => Some(StatusChange {
                code: self.code.clone(),
                from: last,
                to: current,
            }),
            _ => None,
        };
        self.last = Some(current);
        change
    }

    pub fn last(&self) -> Option<OrderStatus> {
        self.last
    }
}

/// Cancels its watcher task when dropped
pub struct WatchHandle {
    token: CancellationToken,
}

impl WatchHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawns and feeds per-code polling tasks
#[derive(Clone)]
pub struct StatusWatcher {
    repo: OrderRepository,
    interval: Duration,
    events: broadcast::Sender<StatusChange>,
}

impl StatusWatcher {
    pub fn new(repo: OrderRepository, interval: Duration) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            repo,
            interval,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusChange> {
        self.events.subscribe()
    }

    /// Start polling the order with this pickup code. The task exits
    /// when the handle is dropped or the order goes terminal; a failed
    /// or empty fetch is logged and retried on the next tick.
    pub fn watch(&self, code: impl Into<String>) -> WatchHandle {
        let code = code.into();
        let repo = self.repo.clone();
        let events = self.events.clone();
        let interval = self.interval;
        let token = CancellationToken::new();
        let task_token = token.clone();

        tokio::spawn(async move {
            tracing::debug!(code = %code, "Status watcher started");
            let mut probe = StatusProbe::new(code.clone());
            let mut ticker = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        tracing::debug!(code = %code, "Status watcher cancelled");
                        break;
                    }
                    _ = ticker.tick() => {}
                }

                match repo.find_by_code(&code) {
                    Ok(Some(order)) => {
                        if let Some(change) = probe.observe(order.status) {
                            tracing::info!(
                                code = %code,
                                from = %change.from,
                                to = %change.to,
                                "Order status changed"
                            );
                            let _ = events.send(change);
                        }
                        if order.status.is_terminal() {
                            tracing::debug!(code = %code, "Order terminal, watcher stopping");
                            break;
                        }
                    }
                    Ok(None) => {
                        tracing::debug!(code = %code, "Order not found yet, will retry");
                    }
                    Err(e) => {
                        tracing::warn!(code = %code, error = %e, "Status poll failed, will retry");
                    }
                }
            }
        });

        WatchHandle { token }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::models::{Order, PaymentMethod};

    use crate::db::store::StoreDb;

    // ==================== StatusProbe ====================

    #[test]
    fn test_first_observation_is_silent() {
        let mut probe = StatusProbe::new("CAF-AAAAA");
        assert!(probe.observe(OrderStatus::Received).is_none());
        assert_eq!(probe.last(), Some(OrderStatus::Received));
    }

    #[test]
    fn test_unchanged_status_does_not_fire() {
        let mut probe = StatusProbe::new("CAF-AAAAA");
        probe.observe(OrderStatus::Received);
        assert!(probe.observe(OrderStatus::Received).is_none());
        assert!(probe.observe(OrderStatus::Received).is_none());
    }

    #[test]
    fn test_each_transition_fires_exactly_once() {
        let mut probe = StatusProbe::new("CAF-AAAAA");
        probe.observe(OrderStatus::Received);

        let change = probe.observe(OrderStatus::Preparing).unwrap();
        assert_eq!(change.from, OrderStatus::Received);
        assert_eq!(change.to, OrderStatus::Preparing);
        assert!(probe.observe(OrderStatus::Preparing).is_none());

        let change = probe.observe(OrderStatus::Ready).unwrap();
        assert_eq!(change.from, OrderStatus::Preparing);
        assert_eq!(change.to, OrderStatus::Ready);
    }

    #[test]
    fn test_skipped_intermediate_states_collapse() {
        // Two back-end transitions between polls look like one change
        let mut probe = StatusProbe::new("CAF-AAAAA");
        probe.observe(OrderStatus::Received);

        let change = probe.observe(OrderStatus::Ready).unwrap();
        assert_eq!(change.from, OrderStatus::Received);
        assert_eq!(change.to, OrderStatus::Ready);
    }

    // ==================== StatusWatcher ====================

    fn test_order(code: &str) -> Order {
        Order {
            id: "order-1".into(),
            code: code.into(),
            customer_name: "Ana".into(),
            customer_phone: "5512345678".into(),
            pickup_time: "12:30 PM".into(),
            payment_method: PaymentMethod::PayAtPickup,
            items: Vec::new(),
            total: Decimal::from(100),
            status: OrderStatus::Received,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_watcher_publishes_status_change() {
        let store = StoreDb::open_in_memory().unwrap();
        let repo = OrderRepository::new(store);
        let order = repo.create(test_order("CAF-TRACK")).unwrap();

        let watcher = StatusWatcher::new(repo.clone(), Duration::from_millis(10));
        let mut events = watcher.subscribe();
        let _handle = watcher.watch("CAF-TRACK");

        // Let the watcher seed its baseline before the transition
        tokio::time::sleep(Duration::from_millis(30)).await;
        repo.update_status(&order.id, OrderStatus::Preparing).unwrap();

        let change = tokio::time::timeout(Duration::from_secs(2), events.recv())
            .await
            .expect("watcher should report within the timeout")
            .unwrap();
        assert_eq!(change.code, "CAF-TRACK");
        assert_eq!(change.from, OrderStatus::Received);
        assert_eq!(change.to, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_dropping_handle_cancels_watcher() {
        let store = StoreDb::open_in_memory().unwrap();
        let repo = OrderRepository::new(store);
        let order = repo.create(test_order("CAF-DROPD")).unwrap();

        let watcher = StatusWatcher::new(repo.clone(), Duration::from_millis(10));
        let mut events = watcher.subscribe();
        let handle = watcher.watch("CAF-DROPD");

        tokio::time::sleep(Duration::from_millis(30)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_millis(30)).await;

        // Changes after cancellation go unreported
        repo.update_status(&order.id, OrderStatus::Preparing).unwrap();
        let result = tokio::time::timeout(Duration::from_millis(100), events.recv()).await;
        assert!(result.is_err());
    }
}
