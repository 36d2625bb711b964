use grocery_supplier_api::{
    config::{AppConfig, StorageBackend},
    db::{create_orm_conn, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let StorageBackend::Postgres(database_url) = &config.storage else {
        anyhow::bail!("migrations need a postgres DATABASE_URL");
    };
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;
    orm.close().await?;
    println!("Migrations applied");
    Ok(())
}
