use axum::Router;

use crate::state::AppState;

pub mod doc;
pub mod health;
pub mod store;
pub mod suppliers;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/store", store::router())
        .nest("/suppliers", suppliers::router())
}
