use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const STATUS_HEALTHY: &str = "healthy";
pub const STATUS_UNHEALTHY: &str = "unhealthy";

/// Per-call metadata handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub report_id: String,
    pub generated_at: DateTime<Utc>,
    pub generated_by: String,
}

impl ReportMetadata {
    /// Report ids have second granularity: `RPT-<student_id>-<unix_seconds>`.
    pub fn new(student_id: i64, generated_by: &str, generated_at: DateTime<Utc>) -> Self {
        Self {
            report_id: format!("RPT-{}-{}", student_id, generated_at.timestamp()),
            generated_at,
            generated_by: generated_by.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResult {
    pub report_id: String,
    pub student_id: i64,
    pub student_name: String,
    pub file_path: String,
    pub generated_at: DateTime<Utc>,
    pub generated_by: String,
    pub file_size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub status: String,
    pub message: String,
}

impl ComponentStatus {
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_HEALTHY.to_string(),
            message: message.into(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_UNHEALTHY.to_string(),
            message: message.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == STATUS_HEALTHY
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub service: String,
    pub healthy: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub components: BTreeMap<String, ComponentStatus>,
}
