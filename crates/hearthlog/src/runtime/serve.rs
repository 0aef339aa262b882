//! Serve — run the tail on a blocking worker until input ends or shutdown.

use tokio::sync::watch;
use tracing::{error, info};

use crate::conf::ReaderConfig;
use crate::runtime::stop::shutdown_signal;
use crate::runtime::tail::{self, RunSummary};

/// Tail the configured log to stdout.
///
/// The reader blocks, so it runs under `spawn_blocking`. A shutdown signal
/// flips the watch channel; the worker notices on its next poll, releases
/// the file and returns its summary.
pub async fn serve(config: ReaderConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker_config = config.clone();
    let mut worker = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        tail::run(&worker_config, shutdown_rx, &mut out)
    });

    let joined = tokio::select! {
        joined = &mut worker => joined,
        _ = shutdown_signal() => {
            let _ = shutdown_tx.send(true);
            if !config.follow {
                info!("Waiting for reader to finish {}", config.log_path);
            }
            worker.await
        }
    };

    let summary = joined?.map_err(|e| {
        error!("Reader failed: {}", e);
        e
    })?;
    log_summary(&summary);
    drop(shutdown_tx);
    Ok(())
}

fn log_summary(summary: &RunSummary) {
    info!(
        "Read {} entries from {} lines ({} not readable, {} of {} pulled lines filtered)",
        summary.read.entries,
        summary.read.lines,
        summary.read.not_readable,
        summary.cursor.lines_filtered,
        summary.cursor.lines_pulled,
    );
    for (i, filter) in summary.filters.iter().enumerate() {
        info!(
            "Filter #{}: scanned={}, matched={}, bytes={}",
            i, filter.lines_scanned, filter.lines_matched, filter.bytes_processed
        );
    }
}
