pub mod report;
pub mod student;

pub use report::{ComponentStatus, HealthStatus, ReportMetadata, ReportResult};
pub use student::{Student, StudentListItem};

use serde::{Deserialize, Serialize};

/// Response envelope shared by the student records API and this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }
}
