use color_eyre::eyre::Result;
use dotenv::dotenv;
use roomresv_db::config::DbConfig;
use roomresv_db::create_pool_from_config;
use roomresv_db::schema::{initialize_database, seed_defaults};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = DbConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Connecting to database {}...", config.database_url);
    let db_pool = create_pool_from_config(&config).await?;

    initialize_database(&db_pool).await?;
    seed_defaults(&db_pool).await?;

    db_pool.close().await;
    info!("Database ready.");

    Ok(())
}
