use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub kafka_bootstrap_servers: String,
    pub kafka_topic: String,
    pub kafka_group_id: String,
    pub kafka_auto_offset_reset: String,
    pub kafka_sasl_mechanism: String,
    pub kafka_username: String,
    pub kafka_password: String,
    pub kafka_security_protocol: String,
    pub kafka_max_retries: u32,
    pub kafka_circuit_breaker_cooldown: u64,
    pub database_url: String,
    pub log_level: String,
    /// km/h; samples above this raise speed alerts and feed the overspeed buckets.
    pub overspeed_limit_kmh: f64,
    /// Samples kept per device for the overspeed distribution.
    pub position_window: usize,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let db_host = var_or("DB_HOST", "localhost");
        let db_port = var_or("DB_PORT", "5432");
        let db_name = var_or("DB_DATABASE", "siscom_admin");
        let db_user = var_or("DB_USER", "siscom");
        let db_pwd = var_or("DB_PWD", "siscom");

        let database_url = format!(
            "postgres://{}:{}@{}:{}/{}",
            db_user, db_pwd, db_host, db_port, db_name
        );

        let position_window: usize = parsed_or("POSITION_WINDOW", 50);

        Ok(Self {
            kafka_bootstrap_servers: var_or("KAFKA_BOOTSTRAP_SERVERS", "localhost:9092"),
            kafka_topic: var_or("KAFKA_TOPIC", "siscom-minimal"),
            kafka_group_id: var_or("KAFKA_GROUP_ID", "siscom-alerts-consumer"),
            kafka_auto_offset_reset: var_or("KAFKA_AUTO_OFFSET_RESET", "latest"),
            kafka_sasl_mechanism: var_or("KAFKA_SASL_MECHANISM", "SCRAM-SHA-256"),
            kafka_username: env::var("KAFKA_USERNAME").unwrap_or_default(),
            kafka_password: env::var("KAFKA_PASSWORD").unwrap_or_default(),
            kafka_security_protocol: var_or("KAFKA_SECURITY_PROTOCOL", "SASL_PLAINTEXT"),
            kafka_max_retries: parsed_or("KAFKA_MAX_RETRIES", 5),
            kafka_circuit_breaker_cooldown: parsed_or("KAFKA_CIRCUIT_BREAKER_COOLDOWN", 300),
            database_url,
            log_level: var_or("LOG_LEVEL", "info"),
            overspeed_limit_kmh: parsed_or("OVERSPEED_LIMIT_KMH", 120.0),
            position_window: position_window.max(1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparseable_numbers_fall_back() {
        env::set_var("SISCOM_ALERTS_TEST_RETRIES", "many");
        assert_eq!(parsed_or("SISCOM_ALERTS_TEST_RETRIES", 5u32), 5);
        env::set_var("SISCOM_ALERTS_TEST_RETRIES", " 7 ");
        assert_eq!(parsed_or("SISCOM_ALERTS_TEST_RETRIES", 5u32), 7);
        assert_eq!(parsed_or("SISCOM_ALERTS_TEST_UNSET", 90.5f64), 90.5);
    }
}
