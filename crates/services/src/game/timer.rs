use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval};

use quiz_core::scoring::TICK_INTERVAL_MS;

/// Per-question wall-clock countdown.
///
/// Ticks every 60 ms with the remaining time (first tick immediately),
/// fires the expiry callback exactly once when the budget is used up,
/// then stops. Cancelling aborts the task; it is idempotent and
/// dropping the handle cancels too. Remaining time is recomputed from
/// elapsed wall-clock, not accumulated ticks.
pub struct CountdownTimer {
    handle: JoinHandle<()>,
}

impl CountdownTimer {
    /// Arm a countdown for `duration`.
    pub fn arm<T, E>(duration: Duration, mut on_tick: T, on_expire: E) -> Self
    where
        T: FnMut(Duration) + Send + 'static,
        E: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let armed_at = Instant::now();
            let mut ticks = interval(Duration::from_millis(TICK_INTERVAL_MS));
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticks.tick().await;
                let remaining = duration.saturating_sub(armed_at.elapsed());
                on_tick(remaining);
                if remaining.is_zero() {
                    break;
                }
            }

            on_expire();
        });

        Self { handle }
    }

    /// Stop ticking and suppress a pending expiry. Safe to call more
    /// than once or after the timer has already expired.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::{advance, sleep};

    #[tokio::test(start_paused = true)]
    async fn expires_exactly_once() {
        let ticks = Arc::new(AtomicU32::new(0));
        let expiries = Arc::new(AtomicU32::new(0));

        let t = Arc::clone(&ticks);
        let e = Arc::clone(&expiries);
        let _timer = CountdownTimer::arm(
            Duration::from_millis(300),
            move |_| {
                t.fetch_add(1, Ordering::SeqCst);
            },
            move || {
                e.fetch_add(1, Ordering::SeqCst);
            },
        );

        // Run well past the deadline.
        for _ in 0..20 {
            advance(Duration::from_millis(60)).await;
            sleep(Duration::from_millis(0)).await;
        }

        assert_eq!(expiries.load(Ordering::SeqCst), 1);
        assert!(ticks.load(Ordering::SeqCst) >= 5);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_expiry_and_is_idempotent() {
        let expiries = Arc::new(AtomicU32::new(0));

        let e = Arc::clone(&expiries);
        let timer = CountdownTimer::arm(
            Duration::from_millis(300),
            |_| {},
            move || {
                e.fetch_add(1, Ordering::SeqCst);
            },
        );

        advance(Duration::from_millis(120)).await;
        sleep(Duration::from_millis(0)).await;

        timer.cancel();
        timer.cancel();

        advance(Duration::from_secs(2)).await;
        sleep(Duration::from_millis(0)).await;
        assert_eq!(expiries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reports_decreasing_remaining_time() {
        let last = Arc::new(AtomicU32::new(u32::MAX));

        let l = Arc::clone(&last);
        let _timer = CountdownTimer::arm(
            Duration::from_millis(600),
            move |remaining| {
                #[allow(clippy::cast_possible_truncation)]
                let ms = remaining.as_millis() as u32;
                let prev = l.swap(ms, Ordering::SeqCst);
                assert!(ms <= prev);
            },
            || {},
        );

        for _ in 0..5 {
            advance(Duration::from_millis(60)).await;
            sleep(Duration::from_millis(0)).await;
        }
        assert!(last.load(Ordering::SeqCst) < 600);
    }
}
