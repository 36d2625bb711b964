use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use uuid::Uuid;

use crate::{
    dto::orders::CreateOrderRequest,
    error::AppResult,
    models::{Order, OrderWithSupplier},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/{id}/complete", post(complete_order))
}

#[utoipa::path(
    post,
    path = "/api/store/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created as pending", body = Order),
        (status = 400, description = "Malformed order")
    ),
    tag = "Store"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = order_service::create_order(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/api/store/orders",
    responses(
        (status = 200, description = "All orders with supplier summary", body = Vec<OrderWithSupplier>)
    ),
    tag = "Store"
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<Vec<OrderWithSupplier>>> {
    let orders = order_service::list_orders(&state).await?;
    Ok(Json(orders))
}

#[utoipa::path(
    post,
    path = "/api/store/orders/{id}/complete",
    params(
        ("id" = Uuid, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order completed", body = Order),
        (status = 404, description = "Order not found")
    ),
    tag = "Store"
)]
pub async fn complete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Order>> {
    let order = order_service::complete_order(&state, id).await?;
    Ok(Json(order))
}
