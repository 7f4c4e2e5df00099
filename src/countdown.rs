//! Per-question countdown task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Default time allowed per question, in seconds.
pub const DEFAULT_TIME_LIMIT: u32 = 30;

const TICK: Duration = Duration::from_secs(1);

/// Events are tagged with the question index the countdown was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick { question: usize, remaining: u32 },
    Expired { question: usize },
}

/// Handle to a running countdown. Dropping it stops the task.
#[derive(Debug)]
pub struct Countdown {
    question: usize,
    token: CancellationToken,
}

impl Countdown {
    /// Spawn a countdown of `seconds` for `question`.
    ///
    /// Sends one `Tick` per elapsed second while time remains, then a single
    /// `Expired`.
    pub fn spawn(question: usize, seconds: u32, tx: mpsc::UnboundedSender<CountdownEvent>) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK, TICK);
            let mut remaining = seconds;

            while remaining > 0 {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        trace!(question, "countdown cancelled");
                        return;
                    }
                    _ = interval.tick() => {}
                }

                remaining -= 1;
                let event = if remaining == 0 {
                    CountdownEvent::Expired { question }
                } else {
                    CountdownEvent::Tick { question, remaining }
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
        });

        Self { question, token }
    }

    pub fn question(&self) -> usize {
        self.question
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_then_expires() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _countdown = Countdown::spawn(2, 3, tx);

        assert_eq!(
            rx.recv().await,
            Some(CountdownEvent::Tick {
                question: 2,
                remaining: 2
            })
        );
        assert_eq!(
            rx.recv().await,
            Some(CountdownEvent::Tick {
                question: 2,
                remaining: 1
            })
        );
        assert_eq!(rx.recv().await, Some(CountdownEvent::Expired { question: 2 }));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_after_full_limit() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let start = Instant::now();
        let _countdown = Countdown::spawn(0, DEFAULT_TIME_LIMIT, tx);

        let mut last = None;
        while let Some(event) = rx.recv().await {
            last = Some(event);
        }

        assert_eq!(last, Some(CountdownEvent::Expired { question: 0 }));
        assert_eq!(start.elapsed(), Duration::from_secs(DEFAULT_TIME_LIMIT as u64));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let countdown = Countdown::spawn(0, 30, tx);

        assert!(matches!(rx.recv().await, Some(CountdownEvent::Tick { .. })));
        countdown.cancel();

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        drop(Countdown::spawn(4, 30, tx));

        assert_eq!(rx.recv().await, None);
    }
}
