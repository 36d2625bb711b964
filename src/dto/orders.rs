use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::OrderLine;

/// Unknown fields, including any `status`, are ignored.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub supplier_id: Uuid,
    #[serde(default)]
    pub products: Vec<OrderLine>,
}
