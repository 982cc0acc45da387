pub mod http;

use std::collections::HashMap;

use crate::models::{Student, StudentListItem};

pub use http::HttpStudentClient;

/// Source of student records.
#[async_trait::async_trait]
pub trait StudentDataClient: Send + Sync {
    async fn list_students(
        &self,
        filters: &HashMap<String, String>,
    ) -> anyhow::Result<Vec<StudentListItem>>;

    /// `Ok(None)` means the API answered and no such student exists.
    async fn get_student_by_id(&self, id: i64) -> anyhow::Result<Option<Student>>;

    async fn health_check(&self) -> anyhow::Result<()>;
}
