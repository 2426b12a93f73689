//! Fan-in of batch outcomes.

use super::worker::task_failed;
use crate::domain::CreationResult;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Drains exactly `expected` outcomes from `receiver`, in arrival order.
///
/// This is the only reader of the channel and the only owner of the
/// accumulated results. If every sender goes away before `expected` outcomes
/// arrived, the missing ones are reported as failed tasks so the batch
/// always holds one outcome per item.
pub(crate) async fn collect_results(
    mut receiver: mpsc::Receiver<CreationResult>,
    expected: usize,
) -> Vec<CreationResult> {
    let mut results = Vec::with_capacity(expected);

    while results.len() < expected {
        match receiver.recv().await {
            Some(outcome) => {
                results.push(outcome);
                debug!(received = results.len(), expected, "Collected outcome");
            }
            None => {
                error!(
                    received = results.len(),
                    expected, "Aggregation channel closed before all outcomes arrived"
                );
                break;
            }
        }
    }

    results.resize_with(expected, task_failed);
    results
}
