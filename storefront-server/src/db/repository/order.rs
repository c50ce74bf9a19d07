//! Order Repository
//!
//! Orders are created once at checkout and never deleted. The only
//! mutable field is `status`, guarded here by the lifecycle state
//! machine in `shared::models::order`.

use shared::models::{Order, OrderStatus};

use super::{RepoError, RepoResult};
use crate::db::store::{ORDERS, StoreDb};

#[derive(Clone)]
pub struct OrderRepository {
    store: StoreDb,
}

impl OrderRepository {
    pub fn new(store: StoreDb) -> Self {
        Self { store }
    }

    /// All orders, newest first (admin dashboard and history views)
    pub fn find_all(&self) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = self.store.get_all(ORDERS)?;
        // RFC 3339 UTC timestamps sort lexicographically
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    pub fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        Ok(self.store.get(ORDERS, id)?)
    }

    /// Customer-facing lookup by short code
    pub fn find_by_code(&self, code: &str) -> RepoResult<Option<Order>> {
        let matches: Vec<Order> = self.store.find(ORDERS, |o: &Order| o.code == code)?;
        Ok(matches.into_iter().next())
    }

    /// Lookup of several codes at once ("my orders" view), newest first
    pub fn find_by_codes(&self, codes: &[String]) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .store
            .find(ORDERS, |o: &Order| codes.contains(&o.code))?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    pub fn create(&self, order: Order) -> RepoResult<Order> {
        self.store.put(ORDERS, &order.id, &order)?;
        Ok(order)
    }

    /// Transition an order's status, enforcing the lifecycle rules
    pub fn update_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let mut order = self
            .find_by_id(id)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id}")))?;

        if !order.status.can_transition_to(status) {
            return Err(RepoError::InvalidTransition(format!(
                "{} -> {}",
                order.status, status
            )));
        }

        tracing::info!(order = %order.code, from = %order.status, to = %status, "Order status changed");
        order.status = status;
        self.store.put(ORDERS, id, &order)?;
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use shared::models::PaymentMethod;
    use shared::order_code::generate_order_code;

    fn make_order(created_at: &str) -> Order {
        Order {
            id: uuid::Uuid::new_v4().to_string(),
            code: generate_order_code(),
            customer_name: "Juan Pérez".into(),
            customer_phone: "55 1234 5678".into(),
            pickup_time: "09:30 AM".into(),
            payment_method: PaymentMethod::PayAtPickup,
            items: vec![],
            total: Decimal::ZERO,
            status: OrderStatus::Received,
            created_at: created_at.into(),
        }
    }

    fn repo() -> OrderRepository {
        OrderRepository::new(StoreDb::open_in_memory().unwrap())
    }

    #[test]
    fn test_find_all_newest_first() {
        let repo = repo();
        repo.create(make_order("2026-08-28T10:00:00+00:00")).unwrap();
        repo.create(make_order("2026-08-29T10:00:00+00:00")).unwrap();
        repo.create(make_order("2026-08-27T10:00:00+00:00")).unwrap();

        let orders = repo.find_all().unwrap();
        assert_eq!(orders[0].created_at, "2026-08-29T10:00:00+00:00");
        assert_eq!(orders[2].created_at, "2026-08-27T10:00:00+00:00");
    }

    #[test]
    fn test_find_by_code() {
        let repo = repo();
        let order = repo.create(make_order(&Utc::now().to_rfc3339())).unwrap();

        let found = repo.find_by_code(&order.code).unwrap();
        assert_eq!(found.unwrap().id, order.id);
        assert!(repo.find_by_code("CAF-ZZZZZ").unwrap().is_none());
    }

    #[test]
    fn test_find_by_codes_filters() {
        let repo = repo();
        let a = repo.create(make_order("2026-08-28T10:00:00+00:00")).unwrap();
        let b = repo.create(make_order("2026-08-29T10:00:00+00:00")).unwrap();
        repo.create(make_order("2026-08-27T10:00:00+00:00")).unwrap();

        let mine = repo
            .find_by_codes(&[a.code.clone(), b.code.clone()])
            .unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, b.id);
    }

    #[test]
    fn test_status_transition_enforced() {
        let repo = repo();
        let order = repo.create(make_order(&Utc::now().to_rfc3339())).unwrap();

        let updated = repo
            .update_status(&order.id, OrderStatus::Preparing)
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Preparing);

        // Skipping straight to Delivered is rejected and nothing changes
        let err = repo.update_status(&order.id, OrderStatus::Delivered);
        assert!(matches!(err, Err(RepoError::InvalidTransition(_))));
        let reloaded = repo.find_by_id(&order.id).unwrap().unwrap();
        assert_eq!(reloaded.status, OrderStatus::Preparing);
    }

    #[test]
    fn test_cancel_then_frozen() {
        let repo = repo();
        let order = repo.create(make_order(&Utc::now().to_rfc3339())).unwrap();

        repo.update_status(&order.id, OrderStatus::Cancelled).unwrap();
        let err = repo.update_status(&order.id, OrderStatus::Preparing);
        assert!(matches!(err, Err(RepoError::InvalidTransition(_))));
    }
}
