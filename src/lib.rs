pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod models;
pub mod pdf;
pub mod routes;
pub mod service;
pub mod shutdown;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;

use service::ReportService;

#[derive(Clone)]
pub struct AppState {
    pub report_service: ReportService,
}
