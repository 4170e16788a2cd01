//! Batch scheduler
//!
//! Runs a worker over a URL list in consecutive chunks:
//! - Every member of a chunk is in flight at the same time
//! - Chunk k+1 starts only after every member of chunk k has resolved
//! - Results come back in input order regardless of completion order
//!
//! Peak concurrency is therefore bounded by the chunk size. There is no work
//! stealing between chunks, so a slow page holds back every later chunk.

use futures::future::join_all;
use std::future::Future;

/// Runs `worker` over `urls` in chunks of `concurrency`, preserving order
///
/// `results[i]` always corresponds to `urls[i]`. A `concurrency` of zero is
/// treated as one.
///
/// # Arguments
///
/// * `urls` - URLs to process, in output order
/// * `concurrency` - Chunk size
/// * `worker` - Produces one result per URL; expected not to fail
///
/// # Example
///
/// ```
/// use seo_audit::crawler::run_batches;
///
/// # async fn example() {
/// let urls = vec!["a".to_string(), "bb".to_string(), "ccc".to_string()];
/// let lengths = run_batches(&urls, 2, |url| async move { url.len() }).await;
/// assert_eq!(lengths, vec![1, 2, 3]);
/// # }
/// ```
pub async fn run_batches<T, F, Fut>(urls: &[String], concurrency: usize, worker: F) -> Vec<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = T>,
{
    let chunk_size = concurrency.max(1);
    let mut results = Vec::with_capacity(urls.len());

    for (index, chunk) in urls.chunks(chunk_size).enumerate() {
        tracing::debug!(
            "Starting batch {} ({} URL(s), {} total)",
            index + 1,
            chunk.len(),
            urls.len()
        );
        results.extend(join_all(chunk.iter().map(|url| worker(url.clone()))).await);
    }

    results
}
