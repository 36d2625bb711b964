use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::SupplierProduct;

#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSupplierRequest {
    pub company_name: String,
    pub phone: String,
    pub representative: String,
    pub password: String,
    #[serde(default)]
    pub products: Vec<SupplierProduct>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}
