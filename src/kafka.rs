use crate::config::AppConfig;
use crate::db::{alerts, DbPool};
use crate::models::Alert;
use crate::processor::{telemetry_processor, SharedState};
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Consumes the telemetry topic with SASL auth and a circuit breaker.
/// Samples are tracked in arrival order; raised alerts are persisted in
/// background tasks.
pub async fn start_kafka_consumer(
    config: &AppConfig,
    pool: DbPool,
    state: SharedState,
) -> anyhow::Result<()> {
    info!("Initializing Kafka consumer for topic: {}", config.kafka_topic);

    let mut client_config = ClientConfig::new();
    client_config
        .set("bootstrap.servers", &config.kafka_bootstrap_servers)
        .set("group.id", &config.kafka_group_id)
        .set("auto.offset.reset", &config.kafka_auto_offset_reset)
        .set("security.protocol", &config.kafka_security_protocol)
        .set("sasl.mechanism", &config.kafka_sasl_mechanism)
        .set("sasl.username", &config.kafka_username)
        .set("sasl.password", &config.kafka_password);

    let consumer: StreamConsumer = client_config.create()?;

    consumer.subscribe(&[&config.kafka_topic])?;
    info!("Subscribed to topic: {}", config.kafka_topic);

    let pool = Arc::new(pool);
    let mut consecutive_failures = 0;
    let max_retries = config.kafka_max_retries;
    let cooldown_duration = Duration::from_secs(config.kafka_circuit_breaker_cooldown);

    loop {
        if consecutive_failures >= max_retries {
            warn!(
                "Circuit breaker tripped ({} consecutive failures)! Sleeping for {} seconds...",
                consecutive_failures, config.kafka_circuit_breaker_cooldown
            );
            tokio::time::sleep(cooldown_duration).await;
            consecutive_failures = 0;
            info!("Circuit breaker reset. Resuming consumption.");
        }

        match consumer.recv().await {
            Ok(m) => {
                consecutive_failures = 0;

                let Some(payload) = m.payload() else {
                    warn!("Received empty payload from Kafka");
                    continue;
                };

                // Recorded on the consumer task so each device's samples keep
                // partition order; only the database write runs detached.
                let Some(position) = telemetry_processor::parse_position(payload) else {
                    continue;
                };
                let Some(alert) = telemetry_processor::track(&state, position).await else {
                    continue;
                };

                let pool = pool.clone();
                let state = state.clone();
                tokio::spawn(async move {
                    let insert = move |alert: Alert| async move {
                        alerts::insert_alert(&pool, &alert).await
                    };
                    if let Err(e) =
                        telemetry_processor::persist_speed_alert(&state, alert, insert).await
                    {
                        error!("Failed to persist speed alert, episode reopened: {}", e);
                    }
                });
            }
            Err(e) => {
                consecutive_failures += 1;
                error!(
                    "Kafka error: {}. Failure count ({} / {})",
                    e, consecutive_failures, max_retries
                );
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }
}
