//! Prometheus text dump of a run's metrics.

use std::path::Path;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

use crate::error::{CliError, CliResult};

/// Install the process-wide Prometheus recorder.
pub fn install() -> CliResult<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| CliError::metrics(e.to_string()))
}

/// Render everything recorded so far into `path`.
pub async fn write(handle: &PrometheusHandle, path: &Path) -> CliResult<()> {
    let body = handle.render();
    tokio::fs::write(path, body)
        .await
        .map_err(|e| CliError::report(path, e))?;
    info!(path = %path.display(), "Metrics written");
    Ok(())
}
