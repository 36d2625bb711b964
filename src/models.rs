use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// Order status as stored and sent over the wire.
///
/// The serialized values are fixed localized literals shared with existing
/// clients. Variants are declared in workflow order, so `Ord` follows
/// Pending < InProcess < Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub enum OrderStatus {
    #[serde(rename = "ממתינה לאישור")]
    Pending,
    #[serde(rename = "בתהליך")]
    InProcess,
    #[serde(rename = "הושלמה")]
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::InProcess,
        OrderStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "ממתינה לאישור",
            OrderStatus::InProcess => "בתהליך",
            OrderStatus::Completed => "הושלמה",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierProduct {
    pub name: String,
    pub price: f64,
    pub min_order_qty: i32,
}

/// A registered supplier. The password hash never leaves the process.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub company_name: String,
    pub phone: String,
    pub representative: String,
    #[serde(skip)]
    pub password_hash: String,
    pub products: Vec<SupplierProduct>,
}

/// Reduced supplier view embedded in the store-wide order listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSummary {
    pub company_name: String,
    pub representative: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    pub name: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub products: Vec<OrderLine>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// A fresh order always starts out pending with both timestamps at `now`.
    pub fn new(supplier_id: Uuid, products: Vec<OrderLine>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            supplier_id,
            products,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_supplier(self, supplier: Option<SupplierSummary>) -> OrderWithSupplier {
        OrderWithSupplier {
            id: self.id,
            supplier_id: supplier,
            products: self.products,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Order as listed for the store: `supplierId` carries the supplier summary,
/// or `null` when the referenced supplier does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithSupplier {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub supplier_id: Option<SupplierSummary>,
    pub products: Vec<OrderLine>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_literals_round_trip_through_strings() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        let err = "Pending".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown order status \"Pending\"");
    }

    #[test]
    fn status_ordering_follows_workflow() {
        assert!(OrderStatus::Pending < OrderStatus::InProcess);
        assert!(OrderStatus::InProcess < OrderStatus::Completed);
    }

    #[test]
    fn supplier_json_hides_password_hash() {
        let supplier = Supplier {
            id: Uuid::new_v4(),
            company_name: "Acme".into(),
            phone: "050".into(),
            representative: "Dana".into(),
            password_hash: "$argon2id$secret".into(),
            products: vec![SupplierProduct {
                name: "Milk".into(),
                price: 5.9,
                min_order_qty: 10,
            }],
        };

        let json = serde_json::to_value(&supplier).unwrap();
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["products"][0]["minOrderQty"], 10);
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("_id").is_some());
    }

    #[test]
    fn new_order_is_pending_with_equal_timestamps() {
        let now = Utc::now();
        let order = Order::new(Uuid::new_v4(), Vec::new(), now);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.created_at, now);
        assert_eq!(order.updated_at, now);
    }
}
