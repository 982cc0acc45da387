use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use student_report_service::{
    AppState, Config,
    client::HttpStudentClient,
    jobs::spawn_cleanup_job,
    pdf::PdfGenerator,
    routes,
    service::ReportService,
    shutdown::shutdown_signal,
    telemetry::{HttpMakeSpan, HttpOnResponse, X_REQUEST_ID, init_telemetry},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let telemetry_guard = init_telemetry(&config)?;

    tracing::info!(
        port = config.port,
        environment = %config.environment,
        student_api = %config.student_api_base_url,
        "Starting student-report-service"
    );

    let student_client = Arc::new(HttpStudentClient::from_config(&config)?);
    let pdf_generator = Arc::new(PdfGenerator::new(
        config.reports_output_dir.clone(),
        config.report_retention,
    )?);

    let report_service = ReportService::new(student_client, pdf_generator);

    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let cleanup_handle = config.cleanup_interval.map(|every| {
        spawn_cleanup_job(report_service.clone(), every, shutdown_tx.subscribe())
    });

    let state = AppState { report_service };

    let request_id_header = X_REQUEST_ID.parse()?;

    let app = routes::create_router(state)
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(HttpMakeSpan)
                .on_response(HttpOnResponse),
        )
        .layer(SetRequestIdLayer::new(
            X_REQUEST_ID.parse()?,
            MakeRequestUuid,
        ))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(60),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(());
    if let Some(handle) = cleanup_handle {
        handle.await?;
    }

    tracing::info!("Server shutdown complete");
    telemetry_guard.shutdown();

    Ok(())
}
