//! Teller configuration.

use std::str::FromStr;

use clap::ValueEnum;

/// How the transaction history is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryFormat {
    /// Boxed text table.
    Table,
    /// Pretty-printed JSON array.
    Json,
}

impl FromStr for HistoryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(HistoryFormat::Table),
            "json" => Ok(HistoryFormat::Json),
            other => Err(format!("Unknown history format: {}", other)),
        }
    }
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

/// Main teller configuration.
#[derive(Debug, Clone)]
pub struct TellerConfig {
    /// Bank name shown in the menu title.
    pub bank_name: String,
    /// Prompt for the account PIN before account operations.
    pub require_pin: bool,
    /// History output format.
    pub history_format: HistoryFormat,
    /// Log output format.
    pub log_format: LogFormat,
    /// Tracing filter directive.
    pub log_level: String,
}

impl Default for TellerConfig {
    fn default() -> Self {
        Self {
            bank_name: "QP Bank".to_string(),
            require_pin: false,
            history_format: HistoryFormat::Table,
            log_format: LogFormat::Text,
            log_level: "warn".to_string(),
        }
    }
}

impl TellerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Unparseable values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(name) = lookup("QPBANK_BANK_NAME") {
            config.bank_name = name;
        }

        if let Some(flag) = lookup("QPBANK_REQUIRE_PIN") {
            config.require_pin = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Some(format) = lookup("QPBANK_HISTORY_FORMAT") {
            if let Ok(format) = format.parse() {
                config.history_format = format;
            }
        }

        if let Some(format) = lookup("QPBANK_LOG_FORMAT") {
            if let Ok(format) = format.parse() {
                config.log_format = format;
            }
        }

        if let Some(level) = lookup("RUST_LOG") {
            config.log_level = level;
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.bank_name.trim().is_empty() {
            return Err("Bank name cannot be empty".to_string());
        }

        if self.log_level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TellerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bank_name, "QP Bank");
        assert!(!config.require_pin);
        assert_eq!(config.history_format, HistoryFormat::Table);
    }

    #[test]
    fn test_config_from_lookup() {
        let config = TellerConfig::from_lookup(lookup(&[
            ("QPBANK_BANK_NAME", "Harbor Bank"),
            ("QPBANK_REQUIRE_PIN", "TRUE"),
            ("QPBANK_HISTORY_FORMAT", "json"),
            ("QPBANK_LOG_FORMAT", "Json"),
            ("RUST_LOG", "qpbank_ledger=debug"),
        ]));

        assert_eq!(config.bank_name, "Harbor Bank");
        assert!(config.require_pin);
        assert_eq!(config.history_format, HistoryFormat::Json);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "qpbank_ledger=debug");
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let config = TellerConfig::from_lookup(lookup(&[
            ("QPBANK_HISTORY_FORMAT", "xml"),
            ("QPBANK_REQUIRE_PIN", "maybe"),
        ]));
        assert_eq!(config.history_format, HistoryFormat::Table);
        assert!(!config.require_pin);
    }

    #[test]
    fn test_invalid_config() {
        let mut config = TellerConfig::default();
        config.bank_name = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
