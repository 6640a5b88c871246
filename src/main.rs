//! DormHub dormitory management service
//!
//! Main application entry point: loads configuration, connects to the
//! database, runs migrations, and optionally seeds sample data.

use tracing::info;

use DormHub::{
    config::Settings,
    database::{connection::create_pool, seed, DatabaseService},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting {}...", DormHub::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = DormHub::database::connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: std::time::Duration::from_secs(30),
        idle_timeout: Some(std::time::Duration::from_secs(600)),
        max_lifetime: Some(std::time::Duration::from_secs(1800)),
    };
    let db_pool = create_pool(&db_config).await?;
    DormHub::database::connection::health_check(&db_pool).await?;

    // Run database migrations
    info!("Running database migrations...");
    DormHub::database::connection::run_migrations(&db_pool).await?;

    // Initialize database service
    let database_service = DatabaseService::new(db_pool);

    // Seed sample data when configured
    let seeded = seed::seed_sample_residents(&database_service.residents, &settings.seed).await?;
    if seeded > 0 {
        info!(count = seeded, "Sample residents seeded");
    }

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(settings, database_service);

    let resident_count = services.resident_service.count().await?;
    let form_stats = services.checkout_service.count_by_status().await?;
    info!(
        residents = resident_count,
        forms = ?form_stats,
        "DormHub is ready"
    );

    Ok(())
}
