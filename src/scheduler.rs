//! Bounded task scheduling — fan-out/fan-in under a fixed concurrency budget

use crate::error::{Error, Result};
use crate::types::WorkItem;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Run one asynchronous operation per work item with at most `limit` items
/// in flight at once.
///
/// Results are collected in **completion order**, not submission order: a
/// fast item finishing after a slow one still lands first. The operation is
/// infallible by construction — callers fold per-item errors into the value
/// they return (typically a [`TaskOutcome`](crate::types::TaskOutcome)), so
/// one item's failure never cancels or delays its siblings, and every
/// submitted item yields exactly one result.
///
/// An empty batch is legal and returns an empty vector immediately. A
/// `limit` of zero is treated as one. The only error path is a worker task
/// lost before producing its result (a panic inside `op`), surfaced as
/// [`Error::Scheduler`] for the whole run.
///
/// No retries, no priorities, no cancellation: this is strictly the
/// concurrency-limiting primitive.
pub async fn run_bounded<T, F, Fut>(limit: usize, items: Vec<WorkItem>, op: F) -> Result<Vec<T>>
where
    F: Fn(WorkItem) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let op = Arc::new(op);
    let mut tasks = JoinSet::new();

    for item in items {
        let semaphore = Arc::clone(&semaphore);
        let op = Arc::clone(&op);
        tasks.spawn(async move {
            // Every task holds a clone of the semaphore and nothing closes
            // it, so acquisition only fails during runtime teardown. Run the
            // operation regardless: the item must still drain to a result.
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(_) => None,
            };
            op(item).await
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => results.push(result),
            Err(err) => return Err(Error::Scheduler(err.to_string())),
        }
    }
    Ok(results)
}
