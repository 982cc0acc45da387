use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub student_api_base_url: String,
    pub student_api_timeout: Duration,
    pub student_api_token: Option<String>,
    pub reports_output_dir: PathBuf,
    pub report_retention: Duration,
    pub cleanup_interval: Option<Duration>,
    pub otel_service_name: String,
    pub otel_exporter_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let timeout_secs: u64 = env::var("STUDENT_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .expect("STUDENT_API_TIMEOUT_SECS must be a number");
        let retention_hours: u64 = env::var("REPORT_RETENTION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .expect("REPORT_RETENTION_HOURS must be a number");
        let cleanup_minutes: u64 = env::var("CLEANUP_INTERVAL_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .expect("CLEANUP_INTERVAL_MINUTES must be a number");

        Self {
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| "8081".to_string())
                .parse()
                .expect("APP_PORT must be a number"),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            student_api_base_url: env::var("STUDENT_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5007".to_string()),
            student_api_timeout: Duration::from_secs(timeout_secs),
            student_api_token: env::var("STUDENT_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            reports_output_dir: env::var("REPORTS_OUTPUT_DIR")
                .unwrap_or_else(|_| "./reports".to_string())
                .into(),
            report_retention: Duration::from_secs(retention_hours * 3600),
            cleanup_interval: cleanup_interval(cleanup_minutes),
            otel_service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "student-report-service".to_string()),
            otel_exporter_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4317".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Zero disables the periodic sweep.
fn cleanup_interval(minutes: u64) -> Option<Duration> {
    (minutes > 0).then(|| Duration::from_secs(minutes * 60))
}
