//! Storage handle shared by all request handlers.
//!
//! The server opens exactly one [`Store`] at startup, injects it through
//! [`crate::state::AppState`] and closes it after shutdown. Two backends exist:
//! Postgres through sea-orm, and a volatile in-memory store used for local
//! runs and tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    models::{Order, OrderWithSupplier, Supplier, UnknownStatus},
    workflow::Transition,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("corrupt record: {0}")]
    Corrupt(#[from] UnknownStatus),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Persists a supplier and its catalog as given.
    async fn insert_supplier(&self, supplier: Supplier) -> StoreResult<Supplier>;

    /// First supplier registered with `phone`, including its password hash.
    async fn find_supplier_by_phone(&self, phone: &str) -> StoreResult<Option<Supplier>>;

    async fn list_suppliers(&self) -> StoreResult<Vec<Supplier>>;

    async fn insert_order(&self, order: Order) -> StoreResult<Order>;

    /// Every order in creation order, with the referenced supplier resolved
    /// to its summary. A dangling reference resolves to `None`.
    async fn list_orders(&self) -> StoreResult<Vec<OrderWithSupplier>>;

    async fn list_orders_for_supplier(&self, supplier_id: Uuid) -> StoreResult<Vec<Order>>;

    /// Applies `transition` to the order and returns the updated record, or
    /// `None` when no order has this id.
    async fn transition_order(
        &self,
        id: Uuid,
        transition: Transition,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Order>>;

    /// Releases the underlying connections.
    async fn close(&self) -> StoreResult<()>;
}
