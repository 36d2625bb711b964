use grocery_supplier_api::{
    config::AppConfig,
    db::open_store,
    dto::suppliers::RegisterSupplierRequest,
    models::SupplierProduct,
    services::supplier_service,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let state = open_store(&config).await?;

    let suppliers = vec![
        (
            "Tnuva",
            "0501234567",
            "Dana Levi",
            "tnuva123",
            vec![("Milk", 5.9, 24), ("Cottage Cheese", 6.5, 12), ("Yogurt", 3.2, 30)],
        ),
        (
            "Osem",
            "0529876543",
            "Yossi Cohen",
            "osem123",
            vec![("Bamba", 4.5, 40), ("Pasta", 7.9, 20)],
        ),
    ];

    for (company_name, phone, representative, password, products) in suppliers {
        ensure_supplier(&state, company_name, phone, representative, password, products).await?;
    }

    state.store.close().await?;
    println!("Seed completed");
    Ok(())
}

async fn ensure_supplier(
    state: &AppState,
    company_name: &str,
    phone: &str,
    representative: &str,
    password: &str,
    products: Vec<(&str, f64, i32)>,
) -> anyhow::Result<()> {
    // Registration does not deduplicate phones, so check first to keep reruns idempotent.
    if state.store.find_supplier_by_phone(phone).await?.is_some() {
        println!("Supplier {company_name} ({phone}) already present");
        return Ok(());
    }

    let payload = RegisterSupplierRequest {
        company_name: company_name.to_string(),
        phone: phone.to_string(),
        representative: representative.to_string(),
        password: password.to_string(),
        products: products
            .into_iter()
            .map(|(name, price, min_order_qty)| SupplierProduct {
                name: name.to_string(),
                price,
                min_order_qty,
            })
            .collect(),
    };
    let supplier = supplier_service::register_supplier(state, payload).await?;

    println!("Ensured supplier {company_name} (id={})", supplier.id);
    Ok(())
}
