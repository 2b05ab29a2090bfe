//! Error kinds surfaced by the optimizer, the fetch collaborator and the scanner.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::analysis::TimeframeFailure;

/// Bad parameters handed to the optimizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("initial balance must be a finite positive number, got {0}")]
    NonPositiveBalance(f64),

    #[error("close price at index {index} must be finite and positive, got {value}")]
    InvalidClose { index: usize, value: f64 },
}

/// Upstream market-data failure, opaque to the core.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{}", describe_fetch(.status, .message))]
pub struct FetchError {
    pub status: Option<u16>,
    pub message: String,
}

fn describe_fetch(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("fetch failed with status {}: {}", code, message),
        None => format!("fetch failed: {}", message),
    }
}

impl FetchError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Network-level failure before any response was received.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    /// Non-success HTTP status with the raw response body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::new(Some(status), body)
    }

    pub fn malformed(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::new(status, format!("malformed response: {}", detail.into()))
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(None, format!("request timed out after {:?}", after))
    }

    /// Rate limits, server errors and transport failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self.status {
            None => true,
            Some(code) => code == 429 || code >= 500,
        }
    }
}

/// Failure of the single-timeframe analysis path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failure of a multi-timeframe scan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    #[error("no viable timeframe: all {} candidates failed", .failures.len())]
    NoViableTimeframe { failures: Vec<TimeframeFailure> },
}

/// Unusable configuration value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
