use uuid::Uuid;

use crate::{
    dto::orders::CreateOrderRequest,
    error::{AppError, AppResult},
    models::{Order, OrderWithSupplier},
    state::AppState,
    workflow::{Transition, stored_now},
};

/// Creates a pending order.
///
/// The supplier id is stored as given: it is not checked against registered
/// suppliers, and line items are neither required nor matched to a catalog.
pub async fn create_order(state: &AppState, payload: CreateOrderRequest) -> AppResult<Order> {
    let CreateOrderRequest {
        supplier_id,
        products,
    } = payload;

    let order = Order::new(supplier_id, products, stored_now());
    let order = state.store.insert_order(order).await?;

    tracing::info!(
        order_id = %order.id,
        %supplier_id,
        lines = order.products.len(),
        "order created"
    );
    Ok(order)
}

pub async fn list_orders(state: &AppState) -> AppResult<Vec<OrderWithSupplier>> {
    let orders = state.store.list_orders().await?;
    tracing::debug!(count = orders.len(), "listed orders with suppliers");
    Ok(orders)
}

/// Store confirms delivery, moving the order to `Completed`.
pub async fn complete_order(state: &AppState, id: Uuid) -> AppResult<Order> {
    transition_order(state, id, Transition::Complete).await
}

pub(crate) async fn transition_order(
    state: &AppState,
    id: Uuid,
    transition: Transition,
) -> AppResult<Order> {
    let order = state
        .store
        .transition_order(id, transition, stored_now())
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(
        order_id = %order.id,
        transition = transition.as_str(),
        status = %order.status,
        "order status changed"
    );
    Ok(order)
}
