//! Final outcome of one import batch.

use serde::{Deserialize, Serialize};

/// Built once per batch call and immutable after return.
///
/// `success` follows the partial-success policy: importing anything,
/// remotely or into the local outbox, counts as success; the message
/// carries the distinction. Server-side batch imports answer with the
/// same shape, so this also deserializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub imported: usize,
    pub errors: Vec<String>,
    pub message: String,
}
