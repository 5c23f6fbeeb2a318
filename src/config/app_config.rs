use std::path::Path;

use serde::Deserialize;

use crate::domain::bucket::BucketDefinition;
use crate::infrastructure::observability::MetricsConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    /// Experiments published into the registry at startup
    pub experiments: Vec<ExperimentDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Bucket split of one experiment as written in configuration files
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExperimentDefinition {
    pub id: String,
    pub buckets: Vec<BucketDefinition>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default files, an optional explicit file,
    /// and `APP__`-prefixed environment variables (highest precedence)
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.metrics.enabled);
        assert!(config.experiments.is_empty());
    }

    #[test]
    fn test_parse_experiments() {
        let config = parse(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [[experiments]]
            id = "checkout-button"
            buckets = [
                { name = "control", percentage = 30.0 },
                { name = "variant1", percentage = 50.0 },
                { name = "variant2", percentage = 20.0 },
            ]
            "#,
        );

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.experiments.len(), 1);
        assert_eq!(config.experiments[0].id, "checkout-button");
        assert_eq!(
            config.experiments[0].buckets[1],
            BucketDefinition::new("variant1", 50.0)
        );
    }

    #[test]
    fn test_parse_legacy_bucket_fields() {
        let config = parse(
            r#"
            [[experiments]]
            id = "exp-1"
            buckets = [
                { bucket_name = "A", percentage_distribution = 70 },
                { bucket_name = "B", percentage_distribution = 30 },
            ]
            "#,
        );

        assert_eq!(
            config.experiments[0].buckets,
            vec![BucketDefinition::new("A", 70.0), BucketDefinition::new("B", 30.0)]
        );
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse("");

        assert_eq!(config.logging.level, "info");
        assert!(config.experiments.is_empty());
    }
}
