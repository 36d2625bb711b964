use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreResult};
use crate::{
    models::{Order, OrderWithSupplier, Supplier, SupplierSummary},
    workflow::Transition,
};

#[derive(Default)]
struct Collections {
    suppliers: Vec<Supplier>,
    orders: Vec<Order>,
}

/// Keeps both collections in insertion order behind one lock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_supplier(&self, supplier: Supplier) -> StoreResult<Supplier> {
        self.inner.write().await.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    async fn find_supplier_by_phone(&self, phone: &str) -> StoreResult<Option<Supplier>> {
        let inner = self.inner.read().await;
        Ok(inner.suppliers.iter().find(|s| s.phone == phone).cloned())
    }

    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        Ok(self.inner.read().await.suppliers.clone())
    }

    async fn insert_order(&self, order: Order) -> StoreResult<Order> {
        self.inner.write().await.orders.push(order.clone());
        Ok(order)
    }

    async fn list_orders(&self) -> StoreResult<Vec<OrderWithSupplier>> {
        let inner = self.inner.read().await;
        let orders = inner
            .orders
            .iter()
            .map(|order| {
                let summary = inner
                    .suppliers
                    .iter()
                    .find(|s| s.id == order.supplier_id)
                    .map(|s| SupplierSummary {
                        company_name: s.company_name.clone(),
                        representative: s.representative.clone(),
                    });
                order.clone().with_supplier(summary)
            })
            .collect();
        Ok(orders)
    }

    async fn list_orders_for_supplier(&self, supplier_id: Uuid) -> StoreResult<Vec<Order>> {
        let inner = self.inner.read().await;
        Ok(inner
            .orders
            .iter()
            .filter(|o| o.supplier_id == supplier_id)
            .cloned()
            .collect())
    }

    async fn transition_order(
        &self,
        id: Uuid,
        transition: Transition,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Order>> {
        let mut inner = self.inner.write().await;
        Ok(inner.orders.iter_mut().find(|o| o.id == id).map(|order| {
            order.apply(transition, now);
            order.clone()
        }))
    }

    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderLine, OrderStatus};

    fn supplier(phone: &str, company: &str) -> Supplier {
        Supplier {
            id: Uuid::new_v4(),
            company_name: company.into(),
            phone: phone.into(),
            representative: "Rep".into(),
            password_hash: String::new(),
            products: Vec::new(),
        }
    }

    #[tokio::test]
    async fn phone_lookup_returns_first_registration() {
        let store = MemoryStore::new();
        let first = store.insert_supplier(supplier("050", "First")).await.unwrap();
        store.insert_supplier(supplier("050", "Second")).await.unwrap();

        let found = store.find_supplier_by_phone("050").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert!(store.find_supplier_by_phone("051").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dangling_supplier_reference_lists_as_none() {
        let store = MemoryStore::new();
        let order = Order::new(
            Uuid::new_v4(),
            vec![OrderLine {
                name: "Bread".into(),
                quantity: 2,
            }],
            Utc::now(),
        );
        store.insert_order(order).await.unwrap();

        let listed = store.list_orders().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].supplier_id.is_none());
    }

    #[tokio::test]
    async fn transition_of_unknown_order_is_none() {
        let store = MemoryStore::new();
        let result = store
            .transition_order(Uuid::new_v4(), Transition::Approve, Utc::now())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn transition_is_persisted() {
        let store = MemoryStore::new();
        let order = store
            .insert_order(Order::new(Uuid::new_v4(), Vec::new(), Utc::now()))
            .await
            .unwrap();

        store
            .transition_order(order.id, Transition::Complete, Utc::now())
            .await
            .unwrap();

        let stored = store
            .list_orders_for_supplier(order.supplier_id)
            .await
            .unwrap();
        assert_eq!(stored[0].status, OrderStatus::Completed);
    }
}
