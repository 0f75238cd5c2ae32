pub const SELECT_ALERTS: &str = r#"
SELECT id, title, description, timestamp, status, alert_type, vehicle_id,
       driver_name, location, lat, lng, comment
FROM alerts
ORDER BY timestamp ASC, id ASC;
"#;

pub const INSERT_ALERT: &str = r#"
INSERT INTO alerts (
    title, description, timestamp, status, alert_type, vehicle_id,
    driver_name, location, lat, lng, comment
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
RETURNING id;
"#;
