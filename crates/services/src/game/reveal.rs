use std::time::Duration;

use tokio::time::sleep;

/// Disclose a memory sequence one number at a time.
///
/// Each element is shown via `show` and held for the dwell time; the
/// future resolves after the last dwell, at which point the caller asks
/// for the sum and arms the countdown. Cancellation is dropping or
/// aborting the task awaiting this future.
pub async fn reveal_sequence<F>(sequence: &[i64], dwell: Duration, mut show: F)
where
    F: FnMut(i64),
{
    for &value in sequence {
        show(value);
        sleep(dwell).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::{Instant, advance};

    #[tokio::test(start_paused = true)]
    async fn shows_each_number_for_the_dwell_time() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        let started = Instant::now();
        let task = tokio::spawn(async move {
            reveal_sequence(&[5, 8, 12], Duration::from_millis(800), move |v| {
                s.lock().unwrap().push(v);
            })
            .await;
            started.elapsed()
        });

        for _ in 0..30 {
            advance(Duration::from_millis(100)).await;
        }

        let elapsed = task.await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![5, 8, 12]);
        assert!(elapsed >= Duration::from_millis(2_400));
    }

    #[tokio::test(start_paused = true)]
    async fn aborting_stops_the_disclosure() {
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = Arc::clone(&seen);
        let task = tokio::spawn(async move {
            reveal_sequence(&[3, 4, 5, 6], Duration::from_millis(800), move |v| {
                s.lock().unwrap().push(v);
            })
            .await;
        });

        // Let the first dwell pass, then cancel mid-reveal.
        advance(Duration::from_millis(900)).await;
        tokio::task::yield_now().await;
        task.abort();
        advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;

        let seen = seen.lock().unwrap();
        assert!(seen.len() < 4, "reveal kept running after abort: {seen:?}");
    }
}
