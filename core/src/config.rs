//! Configuration for the diff engine.
//!
//! `DiffConfig` carries the few behavioral knobs of the comparison so callers
//! do not have to thread loose flags through the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How rows of two tables with equal row counts are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowMatching {
    /// Equal row counts pair rows by position; unequal counts pair by Index.
    ///
    /// A row that moved to a different Index in a same-size table is reported
    /// as field changes on whatever row now occupies its position.
    PositionalWhenCountsMatch,
    /// Always pair rows by Index token.
    ByIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub row_matching: RowMatching,
    /// Bucket name for section existence differences.
    pub general_bucket: String,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            row_matching: RowMatching::PositionalWhenCountsMatch,
            general_bucket: "General".to_string(),
        }
    }
}

impl DiffConfig {
    /// Pairs rows by Index regardless of row counts.
    pub fn index_matching() -> Self {
        Self {
            row_matching: RowMatching::ByIndex,
            ..Default::default()
        }
    }

    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder {
            inner: DiffConfig::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("[INIDIFF_CFG_001] general_bucket must not be empty")]
    EmptyGeneralBucket,
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::EmptyGeneralBucket => {
                crate::error::error_codes::CONFIG_EMPTY_GENERAL_BUCKET
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiffConfigBuilder {
    inner: DiffConfig,
}

impl DiffConfigBuilder {
    pub fn row_matching(mut self, row_matching: RowMatching) -> Self {
        self.inner.row_matching = row_matching;
        self
    }

    pub fn general_bucket(mut self, name: impl Into<String>) -> Self {
        self.inner.general_bucket = name.into();
        self
    }

    pub fn build(self) -> Result<DiffConfig, ConfigError> {
        if self.inner.general_bucket.trim().is_empty() {
            return Err(ConfigError::EmptyGeneralBucket);
        }
        Ok(self.inner)
    }
}
