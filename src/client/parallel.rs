//! Bounded fan-out for per-item API requests.
//!
//! Runs one future per input with at most `max_concurrent` in flight,
//! refilling the pool as each one completes.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

/// Type alias for boxed futures used in the pool
type Pending<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Run `fetch` for every input with bounded concurrency.
///
/// Results are returned in completion order, not input order.
///
/// # Example
///
/// ```ignore
/// let details = fan_out(
///     contact_ids,
///     |id| async move { (id.clone(), directory.get_contact(org_id, &id).await) },
///     10,
/// )
/// .await;
/// ```
pub async fn fan_out<'a, I, T, F, Fut>(inputs: Vec<I>, fetch: F, max_concurrent: usize) -> Vec<T>
where
    T: Send + 'a,
    F: Fn(I) -> Fut,
    Fut: Future<Output = T> + Send + 'a,
{
    if inputs.is_empty() {
        return Vec::new();
    }

    let max_concurrent = max_concurrent.max(1);
    debug!(
        "Fanning out {} requests with max {} concurrent",
        inputs.len(),
        max_concurrent
    );

    let mut results = Vec::with_capacity(inputs.len());
    let mut in_flight: FuturesUnordered<Pending<'a, T>> = FuturesUnordered::new();
    let mut pending = inputs.into_iter();

    // Seed initial batch up to max_concurrent
    for input in pending.by_ref().take(max_concurrent) {
        in_flight.push(Box::pin(fetch(input)));
    }

    // Keep the pool full until every input has been dispatched
    while let Some(result) = in_flight.next().await {
        results.push(result);

        if let Some(next) = pending.next() {
            in_flight.push(Box::pin(fetch(next)));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_fan_out_empty() {
        let result: Vec<usize> = fan_out(Vec::<usize>::new(), |n| async move { n }, 10).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_fan_out_returns_every_result() {
        let mut result = fan_out(vec![1, 2, 3, 4], |n| async move { n * 10 }, 2).await;
        result.sort();
        assert_eq!(result, vec![10, 20, 30, 40]);
    }

    #[tokio::test]
    async fn test_fan_out_zero_concurrency_still_progresses() {
        let result = fan_out(vec![1, 2], |n| async move { n }, 0).await;
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_fan_out_respects_concurrency() {
        let concurrent_count = Arc::new(AtomicUsize::new(0));
        let max_observed = Arc::new(AtomicUsize::new(0));

        let result = fan_out(
            vec![1, 2, 3, 4, 5, 6],
            |n| {
                let cc = concurrent_count.clone();
                let mo = max_observed.clone();
                async move {
                    let current = cc.fetch_add(1, Ordering::SeqCst) + 1;
                    mo.fetch_max(current, Ordering::SeqCst);

                    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

                    cc.fetch_sub(1, Ordering::SeqCst);
                    n
                }
            },
            2,
        )
        .await;

        assert_eq!(result.len(), 6);
        assert!(max_observed.load(Ordering::SeqCst) <= 2);
        assert!(max_observed.load(Ordering::SeqCst) >= 2);
    }
}
