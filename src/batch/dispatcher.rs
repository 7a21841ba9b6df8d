use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::future::join_all;
use futures::FutureExt;

use super::{BatchPolicy, Outcome};

/// Run `action` over `items` in paced chunks.
///
/// Items inside a chunk run concurrently on the calling task and every one of
/// them settles, so a failure never cancels its siblings. Chunks run one after
/// another with `policy.delay` between them (none after the last). The i-th
/// outcome belongs to the i-th item, whatever order the calls finish in.
pub async fn run_batched<T, R, E, F, Fut>(
    items: Vec<T>,
    action: F,
    policy: BatchPolicy,
) -> Vec<Outcome<R>>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
    E: Display,
{
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }

    let chunk_size = match policy.batch_size {
        0 => total,
        n => n,
    };
    let chunk_count = total.div_ceil(chunk_size);

    let mut outcomes = Vec::with_capacity(total);
    let mut remaining = items.into_iter();

    for chunk_index in 0..chunk_count {
        if chunk_index > 0 && !policy.delay.is_zero() {
            tracing::debug!(delay_ms = policy.delay.as_millis() as u64, "Pausing between chunks");
            tokio::time::sleep(policy.delay).await;
        }

        let chunk: Vec<T> = remaining.by_ref().take(chunk_size).collect();
        tracing::debug!(
            chunk = chunk_index + 1,
            chunks = chunk_count,
            size = chunk.len(),
            "Dispatching chunk"
        );

        let settled = join_all(chunk.into_iter().map(|item| settle(action(item)))).await;

        let failed = settled.iter().filter(|o| !o.is_fulfilled()).count();
        if failed > 0 {
            tracing::debug!(chunk = chunk_index + 1, failed, "Chunk settled with failures");
        }

        outcomes.extend(settled);
    }

    outcomes
}

async fn settle<R, E, Fut>(fut: Fut) -> Outcome<R>
where
    Fut: Future<Output = std::result::Result<R, E>>,
    E: Display,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(value)) => Outcome::Fulfilled(value),
        Ok(Err(e)) => Outcome::Rejected(e.to_string()),
        Err(panic) => Outcome::Rejected(panic_message(panic.as_ref())),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}
