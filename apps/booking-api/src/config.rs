//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `booking-api` starts with a local SQLite file and
//! the standard promotion tiers.

use std::env;

use encore_core::{PromotionRule, PromotionTable};

/// Booking API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Promotion tier table, already parsed and sorted
    pub promotions: PromotionTable,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// ## Variables
    /// - `HTTP_PORT` - listen port (default 8080)
    /// - `DATABASE_PATH` - SQLite file path (default `./encore.db`)
    /// - `PROMOTION_RULES` - JSON array of rules; when unset the built-in
    ///   tiers apply (2→5%, 3→10%, 4→15%)
    pub fn load() -> Result<Self, ConfigError> {
        let http_port = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./encore.db".to_string());

        let promotions = match env::var("PROMOTION_RULES") {
            Ok(raw) => {
                let rules: Vec<PromotionRule> = serde_json::from_str(&raw)
                    .map_err(|e| ConfigError::InvalidPromotionRules(e.to_string()))?;
                PromotionTable::new(rules)
            }
            Err(_) => PromotionTable::default(),
        };

        Ok(ApiConfig {
            http_port,
            database_path,
            promotions,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("PROMOTION_RULES is not a valid rule table: {0}")]
    InvalidPromotionRules(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_rules_json_shape() {
        let raw = r#"[
            {"minDistinctItems": 3, "discountPercent": 10, "description": "3+ events: 10% off"},
            {"minDistinctItems": 2, "discountPercent": 5, "description": "2+ events: 5% off"}
        ]"#;
        let rules: Vec<PromotionRule> = serde_json::from_str(raw).unwrap();
        let table = PromotionTable::new(rules);

        assert_eq!(table.evaluate(2).unwrap().discount_percent, 5);
        assert_eq!(table.evaluate(3).unwrap().discount_percent, 10);
    }
}
