use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::StudentDataClient;
use crate::config::Config;
use crate::models::{ApiResponse, Student, StudentListItem};

/// Client for the student records API (`/api/v1/students`).
pub struct HttpStudentClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpStudentClient {
    pub fn new(base_url: &str, timeout: Duration, token: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build student API client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(
            &config.student_api_base_url,
            config.student_api_timeout,
            config.student_api_token.clone(),
        )
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> anyhow::Result<ApiResponse<T>> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!(
            "student API returned {} for {}: {}",
            status,
            what,
            truncate(&body, 200)
        );
    }

    let envelope: ApiResponse<T> = response
        .json()
        .await
        .with_context(|| format!("invalid student API response for {what}"))?;

    if !envelope.success {
        bail!(
            "student API reported failure for {}: {}",
            what,
            envelope.message
        );
    }

    Ok(envelope)
}

#[async_trait::async_trait]
impl StudentDataClient for HttpStudentClient {
    #[tracing::instrument(name = "student_api.list", skip(self), fields(students.count))]
    async fn list_students(
        &self,
        filters: &HashMap<String, String>,
    ) -> anyhow::Result<Vec<StudentListItem>> {
        let response = self
            .get("/api/v1/students")
            .query(filters)
            .send()
            .await
            .context("failed to reach student API")?;

        let students = read_envelope::<Vec<StudentListItem>>(response, "student list")
            .await?
            .data
            .ok_or_else(|| anyhow!("student API response for student list has no data"))?;

        tracing::Span::current().record("students.count", students.len());

        Ok(students)
    }

    #[tracing::instrument(name = "student_api.get", skip(self))]
    async fn get_student_by_id(&self, id: i64) -> anyhow::Result<Option<Student>> {
        let response = self
            .get(&format!("/api/v1/students/{id}"))
            .send()
            .await
            .context("failed to reach student API")?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(student_id = id, "Student not found");
            return Ok(None);
        }

        let student = read_envelope::<Student>(response, &format!("student {id}"))
            .await?
            .data
            .ok_or_else(|| anyhow!("student API response for student {id} has no data"))?;

        Ok(Some(student))
    }

    #[tracing::instrument(name = "student_api.health", skip(self))]
    async fn health_check(&self) -> anyhow::Result<()> {
        let response = self
            .get("/health")
            .send()
            .await
            .context("student API is unreachable")?;

        let status = response.status();
        if !status.is_success() {
            bail!("student API health check returned {status}");
        }

        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        s.char_indices()
            .take_while(|&(i, _)| i < max)
            .map(|(_, c)| c)
            .collect()
    }
}
