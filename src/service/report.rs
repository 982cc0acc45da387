use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use opentelemetry::KeyValue;
use tracing::instrument;

use crate::client::StudentDataClient;
use crate::error::ReportError;
use crate::models::{
    ComponentStatus, HealthStatus, ReportMetadata, ReportResult, StudentListItem,
};
use crate::pdf::ReportRenderer;
use crate::telemetry::{
    REPORT_FAILURES, REPORT_FILE_SIZE, REPORT_GENERATION_DURATION, REPORTS_GENERATED,
};

pub const SERVICE_NAME: &str = "Report Service";
pub const STUDENT_API_COMPONENT: &str = "student_api";
pub const PDF_GENERATOR_COMPONENT: &str = "pdf_generator";

/// Turns a student id into a rendered report using the injected collaborators.
#[derive(Clone)]
pub struct ReportService {
    student_client: Arc<dyn StudentDataClient>,
    renderer: Arc<dyn ReportRenderer>,
}

impl ReportService {
    pub fn new(
        student_client: Arc<dyn StudentDataClient>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            student_client,
            renderer,
        }
    }

    #[instrument(name = "report.list_students", skip(self))]
    pub async fn list_students(
        &self,
        filters: &HashMap<String, String>,
    ) -> Result<Vec<StudentListItem>, ReportError> {
        self.student_client
            .list_students(filters)
            .await
            .map_err(ReportError::DataFetch)
    }

    #[instrument(
        name = "report.generate",
        skip(self),
        fields(report.id, report.file_size)
    )]
    pub async fn generate_student_report(
        &self,
        student_id: i64,
        generated_by: &str,
    ) -> Result<ReportResult, ReportError> {
        let start = Instant::now();

        let result = self.run_pipeline(student_id, generated_by).await;

        match &result {
            Ok(report) => {
                REPORTS_GENERATED.add(1, &[]);
                REPORT_GENERATION_DURATION.record(start.elapsed().as_secs_f64(), &[]);
                REPORT_FILE_SIZE.record(report.file_size as f64, &[]);

                let span = tracing::Span::current();
                span.record("report.id", report.report_id.as_str());
                span.record("report.file_size", report.file_size);

                tracing::info!(
                    report_id = %report.report_id,
                    file_path = %report.file_path,
                    "Report generated"
                );
            }
            Err(err) => {
                REPORT_FAILURES.add(1, &[KeyValue::new("report.stage", err.stage())]);
                tracing::warn!(stage = err.stage(), error = %err, "Report generation failed");
            }
        }

        result
    }

    async fn run_pipeline(
        &self,
        student_id: i64,
        generated_by: &str,
    ) -> Result<ReportResult, ReportError> {
        if student_id <= 0 {
            return Err(ReportError::InvalidArgument(student_id));
        }

        // Stage 1: fetch the student record
        let student = self
            .student_client
            .get_student_by_id(student_id)
            .await
            .map_err(ReportError::DataFetch)?
            .ok_or(ReportError::NotFound(student_id))?;

        // Stage 2: metadata
        let metadata = ReportMetadata::new(student_id, generated_by, Utc::now());

        // Stage 3: render
        let file_path = self
            .renderer
            .generate_student_report(&student, &metadata)
            .await
            .map_err(ReportError::Render)?;

        // Stage 4: file size, best effort
        let file_size = read_file_size(&file_path).await;

        Ok(ReportResult {
            report_id: metadata.report_id,
            student_id,
            student_name: student.format_name(),
            file_path,
            generated_at: metadata.generated_at,
            generated_by: metadata.generated_by,
            file_size,
        })
    }

    /// Never fails; collaborator failures end up in the component map.
    #[instrument(name = "report.health_check", skip(self), fields(healthy))]
    pub async fn health_check(&self) -> HealthStatus {
        let mut components = BTreeMap::new();

        let api_status = match self.student_client.health_check().await {
            Ok(()) => ComponentStatus::healthy("API is responsive"),
            Err(e) => ComponentStatus::unhealthy(format!("{e:#}")),
        };
        components.insert(STUDENT_API_COMPONENT.to_string(), api_status);

        let renderer_status = if self.renderer.is_ready() {
            ComponentStatus::healthy("Generator is ready")
        } else {
            ComponentStatus::unhealthy("Generator not initialized")
        };
        components.insert(PDF_GENERATOR_COMPONENT.to_string(), renderer_status);

        let healthy = components.values().all(ComponentStatus::is_healthy);
        tracing::Span::current().record("healthy", healthy);

        HealthStatus {
            service: SERVICE_NAME.to_string(),
            healthy,
            message: if healthy {
                "All systems operational".to_string()
            } else {
                "Some components are unhealthy".to_string()
            },
            timestamp: Utc::now(),
            components,
        }
    }

    #[instrument(name = "report.cleanup", skip(self))]
    pub async fn cleanup_old_reports(&self) -> Result<(), ReportError> {
        self.renderer
            .cleanup_old_reports()
            .await
            .map_err(ReportError::Cleanup)
    }
}

async fn read_file_size(path: &str) -> u64 {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            tracing::warn!(file_path = %path, error = %e, "Could not determine report file size");
            0
        }
    }
}
