//! Configuration for the outline engine

use serde::{Deserialize, Serialize};

use crate::operations::{OutlineError, Result};

/// Default cap on node depth for indent/dedent
pub const DEFAULT_MAX_DEPTH: i32 = 1000;

/// Default `tracing` directive when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "outline_core=info";

/// Configuration for an [`OutlineService`](crate::services::OutlineService)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutlineConfig {
    /// Indent and dedent are refused for nodes at or below this depth
    pub max_depth: i32,

    /// Fallback filter directive for the log subscriber
    pub log_filter: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl OutlineConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_depth < 1 {
            return Err(OutlineError::InvalidConfig(format!(
                "max_depth must be at least 1, got {}",
                self.max_depth
            )));
        }

        if self.log_filter.trim().is_empty() {
            return Err(OutlineError::InvalidConfig(
                "log_filter cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
