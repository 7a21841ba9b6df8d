use std::future::Future;

use crate::error::{AppError, Result};

use super::PollPolicy;

/// A remote resource that is created asynchronously and becomes usable later.
pub trait Activatable {
    fn resource_id(&self) -> &str;
    fn is_active(&self) -> bool;
}

/// Re-fetch `resource` every `policy.interval` until it reports active.
///
/// Returns the first active state observed. A resource that is already active
/// comes straight back without any fetch. A failed fetch ends the wait with
/// [`AppError::Poll`]; running out of attempts ends it with
/// [`AppError::PollTimeout`].
pub async fn await_active<S, F, Fut>(resource: S, fetch_by_id: F, policy: PollPolicy) -> Result<S>
where
    S: Activatable,
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<S>>,
{
    let mut resource = resource;
    let mut attempts: u32 = 0;

    while !resource.is_active() {
        if let Some(max) = policy.max_attempts {
            if attempts >= max {
                return Err(AppError::PollTimeout {
                    id: resource.resource_id().to_string(),
                    attempts,
                });
            }
        }

        tokio::time::sleep(policy.interval).await;
        attempts += 1;

        let id = resource.resource_id().to_string();
        tracing::debug!(project_id = %id, attempt = attempts, "Polling for activation");

        resource = fetch_by_id(id.clone())
            .await
            .map_err(|e| AppError::Poll {
                id,
                message: e.to_string(),
            })?;
    }

    Ok(resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Debug, Clone, PartialEq)]
    struct State {
        id: String,
        status: &'static str,
    }

    impl Activatable for State {
        fn resource_id(&self) -> &str {
            &self.id
        }

        fn is_active(&self) -> bool {
            self.status == "active"
        }
    }

    fn state(status: &'static str) -> State {
        State {
            id: "proj-1".to_string(),
            status,
        }
    }

    /// Fetcher that replays a fixed sequence of states and counts calls.
    fn scripted(
        statuses: &[&'static str],
    ) -> (
        Arc<Mutex<usize>>,
        impl Fn(String) -> std::future::Ready<Result<State>>,
    ) {
        let calls = Arc::new(Mutex::new(0));
        let script = Arc::new(Mutex::new(statuses.iter().copied().collect::<VecDeque<_>>()));
        let counter = Arc::clone(&calls);
        let fetch = move |id: String| {
            *counter.lock().unwrap() += 1;
            let status = script.lock().unwrap().pop_front().unwrap_or("active");
            std::future::ready(Ok(State { id, status }))
        };
        (calls, fetch)
    }

    fn policy(max_attempts: Option<u32>) -> PollPolicy {
        PollPolicy::new(Duration::from_millis(1000), max_attempts)
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_active_needs_no_fetch() {
        let (calls, fetch) = scripted(&[]);
        let origin = Instant::now();

        let result = await_active(state("active"), fetch, policy(Some(5))).await.unwrap();

        assert!(result.is_active());
        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(origin.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_after_third_fetch() {
        let (calls, fetch) = scripted(&["pending", "pending", "active"]);
        let origin = Instant::now();

        let result = await_active(state("pending"), fetch, policy(None)).await.unwrap();

        assert_eq!(result, state("active"));
        assert_eq!(*calls.lock().unwrap(), 3);
        assert!(origin.elapsed() >= Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let (calls, fetch) = scripted(&["pending"; 10]);

        let err = await_active(state("pending"), fetch, policy(Some(4)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PollTimeout { ref id, attempts: 4 } if id == "proj-1"));
        assert_eq!(*calls.lock().unwrap(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_is_a_poll_error() {
        let fetch = |_id: String| async {
            Err::<State, _>(AppError::RemoteApi("503 Service Unavailable".to_string()))
        };

        let err = await_active(state("pending"), fetch, policy(Some(5)))
            .await
            .unwrap_err();

        match err {
            AppError::Poll { id, message } => {
                assert_eq!(id, "proj-1");
                assert!(message.contains("503"));
            }
            other => panic!("expected poll error, got {other:?}"),
        }
    }
}
