use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

/// Blocks until a dependency answers, probing at a fixed interval.
///
/// There is no attempt limit and no backoff.
#[derive(Debug, Clone, Copy)]
pub struct ReadinessGate {
    interval: Duration,
}

impl ReadinessGate {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs `probe` until it succeeds and returns its value.
    pub async fn wait<T, E, F, Fut>(&self, name: &str, mut probe: F) -> T
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt: u64 = 1;
        loop {
            match probe().await {
                Ok(value) => {
                    info!(dependency = name, attempts = attempt, "dependency is ready");
                    return value;
                }
                Err(err) => {
                    warn!(
                        dependency = name,
                        attempt,
                        error = %err,
                        retry_in_ms = self.interval.as_millis() as u64,
                        "dependency unavailable, retrying"
                    );
                }
            }
            tokio::time::sleep(self.interval).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    type Probe = std::future::Ready<Result<u32, String>>;

    fn failing_until(successful_attempt: u32) -> (Arc<AtomicU32>, impl FnMut() -> Probe) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let probe = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(if n >= successful_attempt {
                Ok(n)
            } else {
                Err(format!("connection refused (attempt {n})"))
            })
        };
        (calls, probe)
    }

    #[tokio::test(start_paused = true)]
    async fn first_success_returns_immediately() {
        let gate = ReadinessGate::new(Duration::from_secs(1));
        let start = Instant::now();
        let (_, probe) = failing_until(1);

        assert_eq!(gate.wait("db", probe).await, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_at_fixed_interval_until_success() {
        let gate = ReadinessGate::new(Duration::from_millis(1000));
        let start = Instant::now();
        let (calls, probe) = failing_until(4);

        assert_eq!(gate.wait("db", probe).await, 4);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn never_gives_up() {
        let gate = ReadinessGate::new(Duration::from_millis(500));
        let (calls, probe) = failing_until(u32::MAX);

        let outcome = tokio::time::timeout(Duration::from_secs(3600), gate.wait("db", probe)).await;
        assert!(outcome.is_err());
        assert!(calls.load(Ordering::SeqCst) >= 7200);
    }
}
