use thiserror::Error;

use super::bucket::BucketValidationError;

/// Errors raised by the allocation engine
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("Invalid configuration for experiment '{experiment_id}': {source}")]
    InvalidConfiguration {
        experiment_id: String,
        #[source]
        source: BucketValidationError,
    },

    #[error("Experiment '{experiment_id}' is not configured")]
    NotConfigured { experiment_id: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AllocationError {
    pub fn invalid_configuration(
        experiment_id: impl Into<String>,
        source: BucketValidationError,
    ) -> Self {
        Self::InvalidConfiguration {
            experiment_id: experiment_id.into(),
            source,
        }
    }

    pub fn not_configured(experiment_id: impl Into<String>) -> Self {
        Self::NotConfigured {
            experiment_id: experiment_id.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "invalid_configuration",
            Self::NotConfigured { .. } => "not_configured",
            Self::InvalidInput { .. } => "invalid_input",
            Self::Internal { .. } => "internal",
        }
    }
}
