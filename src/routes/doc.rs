use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{orders::CreateOrderRequest, suppliers::{LoginRequest, RegisterSupplierRequest}},
    models::{Order, OrderLine, OrderStatus, OrderWithSupplier, Supplier, SupplierProduct, SupplierSummary},
    response::ApiResponse,
    routes::{health, store, suppliers},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        store::create_order,
        store::list_orders,
        store::complete_order,
        suppliers::register,
        suppliers::login,
        suppliers::list_supplier_orders,
        suppliers::approve_order,
        suppliers::list_suppliers
    ),
    components(
        schemas(
            Supplier,
            SupplierProduct,
            SupplierSummary,
            Order,
            OrderLine,
            OrderStatus,
            OrderWithSupplier,
            CreateOrderRequest,
            RegisterSupplierRequest,
            LoginRequest,
            health::HealthData,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Store", description = "Store owner order endpoints"),
        (name = "Suppliers", description = "Supplier registration, login and order approval"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
