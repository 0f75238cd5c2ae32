use siscom_alerts::config::AppConfig;
use siscom_alerts::engine::AlertSummary;
use siscom_alerts::processor::FleetState;
use siscom_alerts::repository::AlertStore;
use siscom_alerts::{db, kafka};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Siscom Alerts Service (Kafka Edition)...");

    let pool = db::init_pool(&config.database_url).await?;
    info!("Connected to database");

    let alerts = db::alerts::load_alerts(&pool).await?;
    let summary = AlertSummary::from_alerts(&alerts);
    info!(
        "Loaded {} alerts ({} untreated)",
        summary.total,
        summary.untreated()
    );

    let state = FleetState::new(
        AlertStore::new(alerts),
        config.overspeed_limit_kmh,
        config.position_window,
    )
    .into_shared();

    kafka::start_kafka_consumer(&config, pool, state).await?;

    Ok(())
}
