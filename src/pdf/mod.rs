pub mod document;
pub mod generator;

use crate::models::{ReportMetadata, Student};

pub use generator::PdfGenerator;

/// Turns a student record into a persisted report document.
#[async_trait::async_trait]
pub trait ReportRenderer: Send + Sync {
    /// Returns the file-system location of the written document.
    async fn generate_student_report(
        &self,
        student: &Student,
        metadata: &ReportMetadata,
    ) -> anyhow::Result<String>;

    async fn cleanup_old_reports(&self) -> anyhow::Result<()>;

    /// Whether the renderer is initialized and able to accept work.
    fn is_ready(&self) -> bool;
}
