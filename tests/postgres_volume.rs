use std::sync::Arc;

use grocery_supplier_api::{
    db::{create_orm_conn, run_migrations},
    dto::suppliers::RegisterSupplierRequest,
    models::OrderStatus,
    services::{order_service, supplier_service},
    state::AppState,
    store::PgStore,
};
use sea_orm::{ConnectionTrait, Statement};

const ORDER_COUNT: usize = 70_000;

// Listings stay unpaginated past the Postgres bind-parameter limit (65535).
#[tokio::test]
async fn listing_orders_beyond_bind_parameter_limit() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) if url != "memory" => url,
        _ => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run the postgres volume test."
            );
            return Ok(());
        }
    };

    let orm = create_orm_conn(&database_url).await?;
    run_migrations(&orm).await?;
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, supplier_products, suppliers CASCADE",
    ))
    .await?;
    let state = AppState::new(Arc::new(PgStore::new(orm.clone())));

    let supplier = supplier_service::register_supplier(
        &state,
        RegisterSupplierRequest {
            company_name: "Acme".into(),
            phone: "050".into(),
            representative: "Dana".into(),
            password: "x".into(),
            products: Vec::new(),
        },
    )
    .await?;

    orm.execute(Statement::from_string(
        backend,
        format!(
            "INSERT INTO orders (id, supplier_id, status, created_at, updated_at) \
             SELECT gen_random_uuid(), '{}', '{}', NOW(), NOW() FROM generate_series(1, {})",
            supplier.id,
            OrderStatus::Pending.as_str(),
            ORDER_COUNT
        ),
    ))
    .await?;
    orm.execute(Statement::from_string(
        backend,
        "INSERT INTO order_items (id, order_id, position, name, quantity) \
         SELECT gen_random_uuid(), id, 0, 'Milk', 1 FROM orders",
    ))
    .await?;

    let orders = order_service::list_orders(&state).await?;
    assert_eq!(orders.len(), ORDER_COUNT);
    assert!(orders.iter().all(|o| o.products.len() == 1));
    assert!(
        orders
            .iter()
            .all(|o| o.supplier_id.as_ref().map(|s| s.company_name.as_str()) == Some("Acme"))
    );

    let supplier_orders = supplier_service::list_supplier_orders(&state, supplier.id).await?;
    assert_eq!(supplier_orders.len(), ORDER_COUNT);

    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, supplier_products, suppliers CASCADE",
    ))
    .await?;
    state.store.close().await?;
    Ok(())
}
