use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::{Context, bail};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::ReportRenderer;
use super::document::PdfDocument;
use crate::models::{ReportMetadata, Student};

const MAX_NAME_ATTEMPTS: u32 = 100;
const NOT_AVAILABLE: &str = "N/A";

/// Writes one PDF per report into `output_dir`.
pub struct PdfGenerator {
    output_dir: PathBuf,
    retention: Duration,
}

impl PdfGenerator {
    pub fn new(output_dir: impl Into<PathBuf>, retention: Duration) -> anyhow::Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!(
                "failed to create report output directory {}",
                output_dir.display()
            )
        })?;

        tracing::info!(output_dir = %output_dir.display(), "PDF generator initialized");

        Ok(Self {
            output_dir,
            retention,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn build_document(student: &Student, metadata: &ReportMetadata) -> PdfDocument {
        let mut doc = PdfDocument::new();
        doc.heading("Student Report")
            .field("Report ID", &metadata.report_id)
            .field(
                "Generated At",
                &metadata
                    .generated_at
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string(),
            )
            .field("Generated By", &metadata.generated_by)
            .blank();

        doc.subheading("Personal Information")
            .field("Name", &student.format_name())
            .field("Student ID", &student.id.to_string())
            .field("Gender", or_na(student.gender.as_deref()))
            .field("Date of Birth", or_na(student.dob.as_deref()))
            .field("Email", or_na(student.email.as_deref()))
            .field("Phone", or_na(student.phone.as_deref()))
            .blank();

        doc.subheading("Academic Information")
            .field("Class", or_na(student.class_name.as_deref()))
            .field("Section", or_na(student.section.as_deref()))
            .field(
                "Roll",
                &student
                    .roll
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            )
            .field("Admission Date", or_na(student.admission_date.as_deref()))
            .field("Status", student.status())
            .blank();

        doc.subheading("Family Information")
            .field("Father", or_na(student.father_name.as_deref()))
            .field("Father Phone", or_na(student.father_phone.as_deref()))
            .field("Mother", or_na(student.mother_name.as_deref()))
            .field("Mother Phone", or_na(student.mother_phone.as_deref()))
            .field("Guardian", or_na(student.guardian_name.as_deref()))
            .field("Guardian Phone", or_na(student.guardian_phone.as_deref()))
            .blank();

        doc.subheading("Address")
            .field("Current", or_na(student.current_address.as_deref()))
            .field("Permanent", or_na(student.permanent_address.as_deref()));

        doc
    }

    /// Never overwrites: a taken name gets a numeric suffix.
    async fn write_unique(&self, stem: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                format!("{stem}.pdf")
            } else {
                format!("{stem}_{attempt}.pdf")
            };
            let path = self.output_dir.join(name);

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => {
                    write_or_discard(&path, file, bytes).await?;
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to create {}", path.display()));
                }
            }
        }

        bail!("no free file name for {stem} after {MAX_NAME_ATTEMPTS} attempts")
    }

    /// Removes `.pdf` files last modified more than `retention` ago.
    pub async fn purge_older_than(&self, retention: Duration) -> anyhow::Result<usize> {
        let mut entries = tokio::fs::read_dir(&self.output_dir)
            .await
            .with_context(|| format!("failed to read {}", self.output_dir.display()))?;

        let now = SystemTime::now();
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("pdf") {
                continue;
            }

            let metadata = match entry.metadata().await {
                Ok(m) if m.is_file() => m,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to stat report file");
                    continue;
                }
            };

            let age = metadata
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or_default();
            if age <= retention {
                continue;
            }

            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to remove old report");
                }
            }
        }

        Ok(removed)
    }
}

/// Writes `bytes` to a freshly created `path`; a partial file is removed on failure.
async fn write_or_discard<W>(path: &Path, mut writer: W, bytes: &[u8]) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        writer.write_all(bytes).await?;
        writer.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(writer);
        if let Err(remove_err) = tokio::fs::remove_file(path).await {
            tracing::warn!(
                path = %path.display(),
                error = %remove_err,
                "Failed to remove partial report"
            );
        }
        return Err(e).with_context(|| format!("failed to write {}", path.display()));
    }

    Ok(())
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

#[async_trait::async_trait]
impl ReportRenderer for PdfGenerator {
    #[tracing::instrument(
        name = "pdf.generate",
        skip(self, student, metadata),
        fields(student.id = student.id, report.id = %metadata.report_id, report.bytes)
    )]
    async fn generate_student_report(
        &self,
        student: &Student,
        metadata: &ReportMetadata,
    ) -> anyhow::Result<String> {
        let bytes = Self::build_document(student, metadata).to_bytes();
        let stem = format!(
            "student_report_{}_{}",
            student.id,
            metadata.generated_at.timestamp()
        );

        let path = self.write_unique(&stem, &bytes).await?;

        tracing::Span::current().record("report.bytes", bytes.len());
        tracing::debug!(path = %path.display(), "Report written");

        Ok(path.to_string_lossy().into_owned())
    }

    #[tracing::instrument(name = "pdf.cleanup", skip(self))]
    async fn cleanup_old_reports(&self) -> anyhow::Result<()> {
        let removed = self.purge_older_than(self.retention).await?;

        tracing::info!(
            removed,
            retention_secs = self.retention.as_secs(),
            "Old reports cleaned up"
        );

        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.output_dir.is_dir()
    }
}
