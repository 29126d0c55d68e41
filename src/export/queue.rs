//! Ordered task queue with a fixed pause between tasks.
//!
//! Some hosts drop file saves that arrive in quick succession, so batch
//! exports space their tasks out. The delay is a policy knob, not a protocol
//! guarantee; nothing downstream depends on its exact value.

use std::time::Duration;

/// Pause between two consecutive exports of one batch.
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacedQueue {
    delay: Duration,
}

impl Default for PacedQueue {
    fn default() -> Self {
        Self::new(DEFAULT_PACING_DELAY)
    }
}

impl PacedQueue {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `task` over `items` in order, sleeping `delay` between tasks.
    ///
    /// Stops at the first error. There is no cancellation: once started, the
    /// batch runs to the end or to that error.
    pub async fn run<T, R, E, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        mut task: impl FnMut(T) -> Fut,
    ) -> Result<Vec<R>, E>
    where
        Fut: Future<Output = Result<R, E>>,
    {
        let mut results = Vec::new();
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            results.push(task(item).await?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn runs_in_order_with_delay_between_tasks() {
        let queue = PacedQueue::new(Duration::from_millis(100));
        let start = Instant::now();
        let mut seen = Vec::new();

        let results: Result<Vec<usize>, ()> = queue
            .run(0..4, |i| {
                seen.push((i, start.elapsed()));
                ready(Ok(i * 10))
            })
            .await;

        assert_eq!(results.unwrap(), vec![0, 10, 20, 30]);
        for (i, elapsed) in &seen {
            let expected = Duration::from_millis(100) * *i as u32;
            assert!(*elapsed >= expected, "task {i} ran early: {elapsed:?}");
            assert!(*elapsed < expected + Duration::from_millis(10));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_trailing_delay_after_last_task() {
        let queue = PacedQueue::default();
        let start = Instant::now();

        let _: Result<Vec<()>, ()> = queue.run(0..4, |_| ready(Ok(()))).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= DEFAULT_PACING_DELAY * 3);
        assert!(elapsed < DEFAULT_PACING_DELAY * 4);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_first_error() {
        let queue = PacedQueue::default();
        let mut calls = 0;

        let result = queue
            .run(0..4, |i| {
                calls += 1;
                ready(if i == 1 { Err("boom") } else { Ok(i) })
            })
            .await;

        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn zero_delay_never_sleeps() {
        let queue = PacedQueue::new(Duration::ZERO);
        let result: Result<Vec<u8>, ()> = queue.run([1, 2, 3], |x| ready(Ok(x))).await;
        assert_eq!(result.unwrap(), vec![1, 2, 3]);
    }
}
