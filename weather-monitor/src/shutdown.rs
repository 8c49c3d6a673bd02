use std::path::Path;

use crate::{
    pipeline::{PipelineError, Sink},
    visualize,
};

/// Close the store, then plot the stored history once.
///
/// Runs whatever way the scheduler loop ended. A loop error takes precedence
/// over a plotting error as the process result.
pub async fn finalize<K, P>(sink: &K, db_path: P, outcome: Result<(), PipelineError>) -> anyhow::Result<()>
where
    K: Sink,
    P: AsRef<Path>,
{
    sink.close().await;
    let plotted = visualize::plot_history(db_path).await;

    if let Err(e) = &plotted {
        if outcome.is_err() {
            tracing::error!(error = %e, "plotting failed after scheduler error");
        }
    }

    outcome?;
    plotted
}
