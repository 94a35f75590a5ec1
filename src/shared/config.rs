use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub sync: SyncConfig,
    pub alerts: AlertConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    pub auto_sync: bool,
    pub drain_interval: u64,
    pub batch_size: u32,
}

/// Immutable snapshot consumed by the alert engine. Each rule can be
/// switched off independently without touching the others.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    pub payment_delay_enabled: bool,
    pub payment_delay_days: i64,
    pub incomplete_data_enabled: bool,
    pub maintenance_enabled: bool,
    pub service_interval_km: f64,
    pub maintenance_warning_ratio: f64,
    pub license_enabled: bool,
    pub license_warning_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub blob_cache_entries: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:data/frota.db".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            sync: SyncConfig {
                auto_sync: true,
                drain_interval: 300, // 5 minutes
                batch_size: 100,
            },
            alerts: AlertConfig::default(),
            storage: StorageConfig {
                data_dir: default_data_dir(),
                blob_cache_entries: 256,
            },
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            payment_delay_enabled: true,
            payment_delay_days: 10,
            incomplete_data_enabled: true,
            maintenance_enabled: true,
            service_interval_km: 10_000.0,
            maintenance_warning_ratio: 0.9,
            license_enabled: true,
            license_warning_days: 30,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("frota"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("FROTA_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v;
            }
        }
        if let Ok(v) = std::env::var("FROTA_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("FROTA_DRAIN_INTERVAL") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.drain_interval = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("FROTA_ALERT_PAYMENT_DELAY_ENABLED") {
            cfg.alerts.payment_delay_enabled = parse_bool(&v, cfg.alerts.payment_delay_enabled);
        }
        if let Ok(v) = std::env::var("FROTA_ALERT_PAYMENT_DELAY_DAYS") {
            if let Some(value) = parse_i64(&v) {
                cfg.alerts.payment_delay_days = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("FROTA_ALERT_INCOMPLETE_DATA_ENABLED") {
            cfg.alerts.incomplete_data_enabled = parse_bool(&v, cfg.alerts.incomplete_data_enabled);
        }
        if let Ok(v) = std::env::var("FROTA_ALERT_MAINTENANCE_ENABLED") {
            cfg.alerts.maintenance_enabled = parse_bool(&v, cfg.alerts.maintenance_enabled);
        }
        if let Ok(v) = std::env::var("FROTA_ALERT_SERVICE_INTERVAL_KM") {
            if let Some(value) = parse_f64(&v) {
                if value > 0.0 {
                    cfg.alerts.service_interval_km = value;
                }
            }
        }
        if let Ok(v) = std::env::var("FROTA_ALERT_LICENSE_ENABLED") {
            cfg.alerts.license_enabled = parse_bool(&v, cfg.alerts.license_enabled);
        }
        if let Ok(v) = std::env::var("FROTA_ALERT_LICENSE_WARNING_DAYS") {
            if let Some(value) = parse_i64(&v) {
                cfg.alerts.license_warning_days = value.max(0);
            }
        }
        if let Ok(v) = std::env::var("FROTA_DATA_DIR") {
            if !v.trim().is_empty() {
                cfg.storage.data_dir = PathBuf::from(v);
            }
        }
        if let Ok(v) = std::env::var("FROTA_BLOB_CACHE_ENTRIES") {
            if let Some(value) = parse_u64(&v) {
                cfg.storage.blob_cache_entries = value.max(1) as usize;
            }
        }

        cfg
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.sync.batch_size == 0 {
            return Err("Sync batch_size must be greater than 0".to_string());
        }
        if self.alerts.payment_delay_days <= 0 {
            return Err("Alert payment_delay_days must be greater than 0".to_string());
        }
        if self.alerts.service_interval_km <= 0.0 {
            return Err("Alert service_interval_km must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.alerts.maintenance_warning_ratio) {
            return Err("Alert maintenance_warning_ratio must be within 0..=1".to_string());
        }
        if self.alerts.license_warning_days < 0 {
            return Err("Alert license_warning_days must not be negative".to_string());
        }
        if self.storage.blob_cache_entries == 0 {
            return Err("Storage blob_cache_entries must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn parse_i64(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_service_interval() {
        let mut cfg = AppConfig::default();
        cfg.alerts.service_interval_km = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_ratio_out_of_range() {
        let mut cfg = AppConfig::default();
        cfg.alerts.maintenance_warning_ratio = 1.5;
        assert!(cfg.validate().is_err());
    }
}
