use std::future::Future;

use mirror_sync::{pipeline, PassSummary, SyncError};

use crate::activity::ActivityLog;
use crate::config::MirrorConfig;
use crate::error::{io_err, DaemonError};

/// Repeats sync passes at a fixed interval, logging every action.
pub struct Scheduler {
    config: MirrorConfig,
    log: ActivityLog,
}

impl Scheduler {
    pub fn new(config: MirrorConfig, log: ActivityLog) -> Self {
        Self { config, log }
    }

    /// Run one pass. Failures are logged as a single `Error:` line and
    /// returned for inspection, never propagated further.
    pub fn run_pass(&mut self) -> Result<PassSummary, SyncError> {
        let log = &mut self.log;
        let result = pipeline::run_pass(&self.config.source, &self.config.replica, |applied| {
            log.record(applied.to_string());
        });

        match &result {
            Ok(summary) => {
                tracing::debug!(
                    copied = summary.copied,
                    removed = summary.removed,
                    duration_ms = summary.duration.as_millis(),
                    "sync pass completed",
                );
            }
            Err(err) => {
                self.log.record(format!("Error: {err}"));
                tracing::debug!(error = %err, "sync pass failed");
            }
        }
        result
    }

    /// Pass, sleep, repeat until `shutdown` resolves.
    ///
    /// The first pass starts immediately. `shutdown` is only observed while
    /// sleeping, so an in-flight pass always runs to completion. Returns the
    /// number of passes run.
    pub async fn run_until<F>(mut self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut passes = 0u64;

        loop {
            let _ = self.run_pass();
            passes += 1;

            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(passes, "shutdown requested, stopping scheduler");
                    break;
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        passes
    }

    /// Run until the process receives Ctrl-C.
    pub async fn run(self) -> u64 {
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "ctrl-c handler unavailable; running until killed");
                std::future::pending::<()>().await;
            }
        })
        .await
    }
}

/// Start the scheduler and block the current thread until it is interrupted.
pub fn start_blocking(config: MirrorConfig) -> Result<(), DaemonError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;

    tracing::info!(
        source = %config.source.display(),
        replica = %config.replica.display(),
        interval_secs = config.interval.as_secs(),
        log_file = %config.log_file.display(),
        "starting sync scheduler",
    );
    let log = ActivityLog::new(&config.log_file);
    runtime.block_on(Scheduler::new(config, log).run());
    Ok(())
}

/// Run exactly one pass with the standard console + file sink.
pub fn run_single_pass(config: MirrorConfig) -> Result<PassSummary, DaemonError> {
    init_tracing();
    let log = ActivityLog::new(&config.log_file);
    Ok(Scheduler::new(config, log).run_pass()?)
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
