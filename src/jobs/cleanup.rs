use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::service::ReportService;

/// Runs report cleanup on a fixed interval until a shutdown message arrives.
/// The first sweep happens immediately.
pub fn spawn_cleanup_job(
    service: ReportService,
    every: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        tracing::info!(interval_secs = every.as_secs(), "Report cleanup job started");

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let span = tracing::info_span!("job.cleanup_reports");
                    if let Err(e) = service.cleanup_old_reports().instrument(span).await {
                        tracing::error!(error = %e, "Scheduled report cleanup failed");
                    }
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("Cleanup job received shutdown signal");
                    break;
                }
            }
        }
    })
}
