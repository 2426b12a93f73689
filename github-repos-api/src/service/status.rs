//! Aggregate status of a batch.

use crate::domain::CreationResult;
use crate::errors::{ApiError, STATUS_CREATED, STATUS_INTERNAL_SERVER_ERROR, STATUS_PARTIAL_CONTENT};

/// Derives one status code from the outcomes of a batch of `expected` items.
///
/// 1. Every item succeeded (an empty batch included): `201`.
/// 2. No item succeeded: the status of the first error in `results`.
/// 3. Otherwise: `206`.
#[must_use]
pub fn compute_status(results: &[CreationResult], expected: usize) -> u16 {
    let successes = results.iter().filter(|r| r.is_success()).count();

    if successes == expected {
        return STATUS_CREATED;
    }

    if successes == 0 {
        return results
            .iter()
            .find_map(CreationResult::error)
            .map_or(STATUS_INTERNAL_SERVER_ERROR, ApiError::status);
    }

    STATUS_PARTIAL_CONTENT
}
