use std::sync::Arc;

use grocery_supplier_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        orders::CreateOrderRequest,
        suppliers::{LoginRequest, RegisterSupplierRequest},
    },
    models::{OrderLine, OrderStatus, SupplierProduct},
    services::{order_service, supplier_service},
    state::AppState,
    store::PgStore,
};
use sea_orm::{ConnectionTrait, Statement};

// Integration flow against Postgres: register -> login -> order -> approve -> complete.
#[tokio::test]
async fn supplier_order_flow_on_postgres() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) if url != "memory" => url,
        _ => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run the postgres flow test."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let supplier = supplier_service::register_supplier(&state, acme_registration()).await?;

    let logged_in = supplier_service::login_supplier(
        &state,
        LoginRequest {
            phone: "050".into(),
            password: "x".into(),
        },
    )
    .await?;
    assert_eq!(logged_in.id, supplier.id);
    let catalog: Vec<&str> = logged_in.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(catalog, ["Milk", "Butter"]);

    let order = order_service::create_order(
        &state,
        CreateOrderRequest {
            supplier_id: supplier.id,
            products: vec![
                OrderLine {
                    name: "Milk".into(),
                    quantity: 5,
                },
                OrderLine {
                    name: "Butter".into(),
                    quantity: 4,
                },
            ],
        },
    )
    .await?;

    let listed = order_service::list_orders(&state).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].created_at, order.created_at);
    assert_eq!(listed[0].updated_at, order.updated_at);
    assert_eq!(listed[0].status, OrderStatus::Pending);
    assert_eq!(
        listed[0].supplier_id.as_ref().map(|s| s.company_name.as_str()),
        Some("Acme")
    );
    assert_eq!(listed[0].products[1].name, "Butter");

    let approved = supplier_service::approve_order(&state, order.id).await?;
    assert_eq!(approved.status, OrderStatus::InProcess);
    assert!(approved.updated_at >= order.updated_at);
    let reread = supplier_service::list_supplier_orders(&state, supplier.id).await?;
    assert_eq!(reread[0].created_at, order.created_at);
    assert_eq!(reread[0].updated_at, approved.updated_at);

    let completed = order_service::complete_order(&state, order.id).await?;
    assert_eq!(completed.status, OrderStatus::Completed);

    let supplier_orders = supplier_service::list_supplier_orders(&state, supplier.id).await?;
    assert_eq!(supplier_orders.len(), 1);
    assert_eq!(supplier_orders[0].status, OrderStatus::Completed);
    assert_eq!(supplier_orders[0].products.len(), 2);
    assert_eq!(supplier_orders[0].created_at, order.created_at);
    assert_eq!(supplier_orders[0].updated_at, completed.updated_at);

    // A second registration with the same phone does not shadow the first.
    let mut duplicate = acme_registration();
    duplicate.company_name = "Acme Two".into();
    duplicate.password = "z".into();
    supplier_service::register_supplier(&state, duplicate).await?;
    let first = supplier_service::login_supplier(
        &state,
        LoginRequest {
            phone: "050".into(),
            password: "x".into(),
        },
    )
    .await?;
    assert_eq!(first.id, supplier.id);
    let names: Vec<String> = supplier_service::list_suppliers(&state)
        .await?
        .into_iter()
        .map(|s| s.company_name)
        .collect();
    assert_eq!(names, ["Acme", "Acme Two"]);

    state.store.close().await?;
    Ok(())
}

fn acme_registration() -> RegisterSupplierRequest {
    RegisterSupplierRequest {
        company_name: "Acme".into(),
        phone: "050".into(),
        representative: "Dana".into(),
        password: "x".into(),
        products: vec![
            SupplierProduct {
                name: "Milk".into(),
                price: 5.9,
                min_order_qty: 10,
            },
            SupplierProduct {
                name: "Butter".into(),
                price: 8.0,
                min_order_qty: 4,
            },
        ],
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE order_items, orders, supplier_products, suppliers CASCADE",
    ))
    .await?;

    Ok(AppState::new(Arc::new(PgStore::new(orm))))
}
