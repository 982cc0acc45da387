//! Hand-written collaborator doubles shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::client::StudentDataClient;
use crate::models::{ReportMetadata, Student, StudentListItem};
use crate::pdf::ReportRenderer;

pub(crate) enum Fetch {
    Found,
    Missing,
    Fails,
}

pub(crate) struct FakeClient {
    pub(crate) fetch: Fetch,
    pub(crate) healthy: bool,
    pub(crate) calls: AtomicUsize,
    pub(crate) last_filters: Mutex<Option<HashMap<String, String>>>,
}

impl FakeClient {
    pub(crate) fn new(fetch: Fetch) -> Self {
        Self {
            fetch,
            healthy: true,
            calls: AtomicUsize::new(0),
            last_filters: Mutex::new(None),
        }
    }

    pub(crate) fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }
}

#[async_trait::async_trait]
impl StudentDataClient for FakeClient {
    async fn list_students(
        &self,
        filters: &HashMap<String, String>,
    ) -> anyhow::Result<Vec<StudentListItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_filters.lock().unwrap() = Some(filters.clone());
        match self.fetch {
            Fetch::Fails => Err(anyhow::anyhow!("connection refused")),
            _ => Ok(vec![
                StudentListItem {
                    id: 2,
                    name: "Alan Turing".to_string(),
                    ..Default::default()
                },
                StudentListItem {
                    id: 1,
                    name: "Ada Lovelace".to_string(),
                    ..Default::default()
                },
            ]),
        }
    }

    async fn get_student_by_id(&self, id: i64) -> anyhow::Result<Option<Student>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fetch {
            Fetch::Found => Ok(Some(Student {
                id,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                ..Default::default()
            })),
            Fetch::Missing => Ok(None),
            Fetch::Fails => Err(anyhow::anyhow!("connection refused")),
        }
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(anyhow::anyhow!("connection refused").context("student API is unreachable"))
        }
    }
}

pub(crate) enum Render {
    Path(String),
    Fails,
}

pub(crate) struct FakeRenderer {
    pub(crate) render: Render,
    pub(crate) ready: bool,
    pub(crate) cleanup_fails: bool,
    pub(crate) calls: AtomicUsize,
    pub(crate) rendered: Mutex<Option<(i64, ReportMetadata)>>,
}

impl FakeRenderer {
    pub(crate) fn new(render: Render) -> Self {
        Self {
            render,
            ready: true,
            cleanup_fails: false,
            calls: AtomicUsize::new(0),
            rendered: Mutex::new(None),
        }
    }
}

#[async_trait::async_trait]
impl ReportRenderer for FakeRenderer {
    async fn generate_student_report(
        &self,
        student: &Student,
        metadata: &ReportMetadata,
    ) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.rendered.lock().unwrap() = Some((student.id, metadata.clone()));
        match &self.render {
            Render::Path(path) => Ok(path.clone()),
            Render::Fails => Err(anyhow::anyhow!("disk full")),
        }
    }

    async fn cleanup_old_reports(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.cleanup_fails {
            Err(anyhow::anyhow!("permission denied"))
        } else {
            Ok(())
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
