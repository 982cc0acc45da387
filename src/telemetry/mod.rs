pub mod http;
pub mod init;
pub mod metrics;

pub use http::{HttpMakeSpan, HttpOnResponse, X_REQUEST_ID};
pub use init::{TelemetryGuard, init_telemetry};
pub use metrics::*;
