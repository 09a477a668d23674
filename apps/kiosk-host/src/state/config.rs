//! # Configuration State
//!
//! Host configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`KIOSK_*`)
//! 2. Catalog file in the platform data directory
//! 3. Defaults (this file, plus the built-in seed menu)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use kiosk_core::validation::validate_max_quantity;
use kiosk_core::{seed, Catalog, Money, OrderConfig};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::HostError;

/// Interval between increments while "+" is held (the kiosk used 0.1 s).
pub const DEFAULT_HOLD_INTERVAL_MS: u64 = 100;

/// Capacity of the render-event broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// File name looked up in the platform data directory.
const CATALOG_FILE_NAME: &str = "catalog.json";

/// Host configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    /// Store name (shown on the receipt)
    pub store_name: String,

    /// Appended to every amount (`12,500원`)
    pub currency_suffix: String,

    /// Quantity cap and overflow policy handed to the order state
    pub order: OrderConfig,

    /// Tick of the hold-to-repeat driver
    #[serde(skip)]
    pub hold_interval: Duration,

    /// Explicit catalog file; `None` means data dir, then seed menu
    pub catalog_path: Option<PathBuf>,

    /// Render-event channel capacity
    pub event_capacity: usize,
}

impl Default for HostConfig {
    /// Returns defaults matching the shipped kiosk.
    ///
    /// ## Default Values
    /// - Store: "iMacDonald"
    /// - Currency: 원
    /// - Cap: 50 per line, excess dropped
    /// - Hold interval: 100 ms
    fn default() -> Self {
        HostConfig {
            store_name: "iMacDonald".to_string(),
            currency_suffix: "원".to_string(),
            order: OrderConfig::default(),
            hold_interval: Duration::from_millis(DEFAULT_HOLD_INTERVAL_MS),
            catalog_path: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl HostConfig {
    /// Creates a HostConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `KIOSK_STORE_NAME`: Override store name
    /// - `KIOSK_CURRENCY_SUFFIX`: Override currency suffix
    /// - `KIOSK_MAX_QUANTITY`: Per-line cap (1-999)
    /// - `KIOSK_OVERFLOW_POLICY`: `clamp` or `reject`
    /// - `KIOSK_HOLD_INTERVAL_MS`: Hold-to-repeat tick
    /// - `KIOSK_CATALOG_PATH`: Catalog JSON file
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = HostConfig::default();

        if let Some(store_name) = lookup("KIOSK_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(suffix) = lookup("KIOSK_CURRENCY_SUFFIX") {
            config.currency_suffix = suffix;
        }

        if let Some(raw) = lookup("KIOSK_MAX_QUANTITY") {
            match raw.trim().parse::<u32>() {
                Ok(max) => match validate_max_quantity(max) {
                    Ok(()) => config.order.max_quantity = max,
                    Err(e) => warn!(value = %raw, error = %e, "ignoring KIOSK_MAX_QUANTITY"),
                },
                Err(_) => warn!(value = %raw, "ignoring KIOSK_MAX_QUANTITY"),
            }
        }

        if let Some(raw) = lookup("KIOSK_OVERFLOW_POLICY") {
            match raw.parse() {
                Ok(policy) => config.order.overflow = policy,
                Err(e) => warn!(value = %raw, error = %e, "ignoring KIOSK_OVERFLOW_POLICY"),
            }
        }

        if let Some(raw) = lookup("KIOSK_HOLD_INTERVAL_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.hold_interval = Duration::from_millis(ms),
                _ => warn!(value = %raw, "ignoring KIOSK_HOLD_INTERVAL_MS"),
            }
        }

        if let Some(path) = lookup("KIOSK_CATALOG_PATH") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Loads the catalog.
    ///
    /// ## Resolution
    /// 1. `catalog_path` if set (must exist)
    /// 2. `<data dir>/catalog.json` if present
    ///    - **macOS**: `~/Library/Application Support/com.imacdonald.kiosk/`
    ///    - **Linux**: `~/.local/share/kiosk/`
    /// 3. The built-in seed menu
    pub fn load_catalog(&self) -> Result<Catalog, HostError> {
        let path = match &self.catalog_path {
            Some(path) => Some(path.clone()),
            None => default_catalog_path().filter(|p| p.is_file()),
        };

        match path {
            Some(path) => {
                let json = std::fs::read_to_string(&path).map_err(|e| {
                    HostError::config(format!("cannot read {}: {}", path.display(), e))
                })?;
                let catalog = Catalog::from_json(&json)?;
                info!(path = %path.display(), items = catalog.len(), "catalog loaded from file");
                Ok(catalog)
            }
            None => {
                let catalog = seed::default_catalog()?;
                info!(items = catalog.len(), "using built-in menu");
                Ok(catalog)
            }
        }
    }

    /// Formats an amount with the configured suffix.
    ///
    /// ## Example
    /// ```rust
    /// use kiosk_core::Money;
    /// use kiosk_host::state::HostConfig;
    ///
    /// let config = HostConfig::default();
    /// assert_eq!(config.format_currency(Money::from_amount(12500)), "12,500원");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!("{}{}", amount, self.currency_suffix)
    }
}

/// `<platform data dir>/catalog.json`, if a home directory can be resolved.
pub fn default_catalog_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "imacdonald", "kiosk")
        .map(|dirs| dirs.data_dir().join(CATALOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OrderSession;
    use kiosk_core::OverflowPolicy;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = HostConfig::from_lookup(|_| None);
        assert_eq!(config.order.max_quantity, 50);
        assert_eq!(config.order.overflow, OverflowPolicy::Clamp);
        assert_eq!(config.hold_interval, Duration::from_millis(100));
        assert_eq!(config.currency_suffix, "원");
    }

    #[test]
    fn test_env_overrides() {
        let config = HostConfig::from_lookup(lookup(&[
            ("KIOSK_MAX_QUANTITY", "10"),
            ("KIOSK_OVERFLOW_POLICY", "reject"),
            ("KIOSK_HOLD_INTERVAL_MS", "250"),
            ("KIOSK_STORE_NAME", "Test Store"),
            ("KIOSK_CATALOG_PATH", "/tmp/menu.json"),
        ]));
        assert_eq!(config.order.max_quantity, 10);
        assert_eq!(config.order.overflow, OverflowPolicy::Reject);
        assert_eq!(config.hold_interval, Duration::from_millis(250));
        assert_eq!(config.store_name, "Test Store");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/menu.json")));
    }

    #[test]
    fn test_bad_values_are_ignored() {
        let config = HostConfig::from_lookup(lookup(&[
            ("KIOSK_MAX_QUANTITY", "lots"),
            ("KIOSK_OVERFLOW_POLICY", "shout"),
            ("KIOSK_HOLD_INTERVAL_MS", "0"),
        ]));
        assert_eq!(config.order.max_quantity, 50);
        assert_eq!(config.order.overflow, OverflowPolicy::Clamp);
        assert_eq!(config.hold_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_out_of_range_cap_keeps_default() {
        for raw in ["0", "1000"] {
            let config = HostConfig::from_lookup(lookup(&[("KIOSK_MAX_QUANTITY", raw)]));
            assert_eq!(config.order.max_quantity, 50);
            assert!(OrderSession::new(seed::default_catalog().unwrap(), &config).is_ok());
        }

        let config = HostConfig::from_lookup(lookup(&[("KIOSK_MAX_QUANTITY", "999")]));
        assert_eq!(config.order.max_quantity, 999);
    }

    #[test]
    fn test_format_currency() {
        let config = HostConfig::default();
        assert_eq!(config.format_currency(Money::from_amount(0)), "0원");
        assert_eq!(config.format_currency(Money::from_amount(4500)), "4,500원");
    }

    #[test]
    fn test_missing_catalog_file_is_config_error() {
        let config = HostConfig {
            catalog_path: Some(PathBuf::from("/definitely/not/here/catalog.json")),
            ..HostConfig::default()
        };
        let err = config.load_catalog().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_catalog_file_is_loaded() {
        let path = std::env::temp_dir().join(format!("kiosk-catalog-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{"id":"cola","name":"콜라","price":5000,"imageRef":"cola","category":"drink"}]"#,
        )
        .unwrap();

        let config = HostConfig {
            catalog_path: Some(path.clone()),
            ..HostConfig::default()
        };
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);

        std::fs::remove_file(path).unwrap();
    }
}
