//! Batched execution of remote mutation calls.
//!
//! Spotify endpoints cap how many ids one request may carry (50 for follows,
//! 100 for playlist additions). [`dispatch`] splits an id list into chunks
//! of at most that size, runs the given action once per chunk sequentially,
//! and collects per-chunk outcomes into a [`BatchReport`].

use std::future::Future;

/// One failed chunk: its position in the chunk sequence and the error text.
#[derive(Debug)]
pub struct FailedChunk {
    pub index: usize,
    pub error: String,
}

/// Per-chunk outcomes of one dispatch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of items in chunks whose action succeeded.
    pub succeeded: usize,
    pub failed: Vec<FailedChunk>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs `action` once per chunk of at most `batch_size` items, in order.
///
/// With `halt_on_error` a chunk failure skips every remaining chunk; the
/// playlist workflow wants that, because a visibly truncated playlist beats
/// a silently reordered one. Without it every chunk is attempted, which fits
/// the follow workflow where chunks are independent.
pub async fn dispatch<T, F, Fut, E>(
    items: &[T],
    batch_size: usize,
    halt_on_error: bool,
    mut action: F,
) -> BatchReport
where
    T: Clone,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    let mut report = BatchReport::default();
    if items.is_empty() || batch_size == 0 {
        return report;
    }

    for (index, chunk) in items.chunks(batch_size).enumerate() {
        match action(chunk.to_vec()).await {
            Ok(()) => report.succeeded += chunk.len(),
            Err(e) => {
                report.failed.push(FailedChunk {
                    index,
                    error: e.to_string(),
                });
                if halt_on_error {
                    break;
                }
            }
        }
    }

    report
}
