use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::suppliers::{LoginRequest, RegisterSupplierRequest},
    error::AppResult,
    models::{Order, Supplier},
    services::supplier_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        // Both order routes share the `{id}` segment name; here it is a supplier id.
        .route("/orders/{id}", get(list_supplier_orders))
        .route("/orders/{id}/approve", post(approve_order))
        .route("/all", get(list_suppliers))
}

#[utoipa::path(
    post,
    path = "/api/suppliers/register",
    request_body = RegisterSupplierRequest,
    responses(
        (status = 201, description = "Supplier registered", body = Supplier),
        (status = 400, description = "Invalid catalog")
    ),
    tag = "Suppliers"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterSupplierRequest>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let supplier = supplier_service::register_supplier(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

#[utoipa::path(
    post,
    path = "/api/suppliers/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Supplier document", body = Supplier),
        (status = 401, description = "Invalid phone or password")
    ),
    tag = "Suppliers"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<Supplier>> {
    let supplier = supplier_service::login_supplier(&state, payload).await?;
    Ok(Json(supplier))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/orders/{supplier_id}",
    params(
        ("supplier_id" = Uuid, Path, description = "Supplier id")
    ),
    responses(
        (status = 200, description = "Orders addressed to the supplier", body = Vec<Order>)
    ),
    tag = "Suppliers"
)]
pub async fn list_supplier_orders(
    State(state): State<AppState>,
    Path(supplier_id): Path<Uuid>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = supplier_service::list_supplier_orders(&state, supplier_id).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    post,
    path = "/api/suppliers/orders/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order moved to in process", body = Order),
        (status = 404, description = "Order not found")
    ),
    tag = "Suppliers"
)]
pub async fn approve_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    let order = supplier_service::approve_order(&state, id).await?;
    Ok(Json(order))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/all",
    responses(
        (status = 200, description = "All registered suppliers", body = Vec<Supplier>)
    ),
    tag = "Suppliers"
)]
pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<Supplier>>> {
    let suppliers = supplier_service::list_suppliers(&state).await?;
    Ok(Json(suppliers))
}
