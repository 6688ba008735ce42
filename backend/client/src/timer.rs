use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::{
    task::JoinHandle,
    time::{Instant, interval_at},
};
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

/// Elapsed-seconds counter. The ticking task is aborted on pause, reset and drop.
#[derive(Debug, Default)]
pub struct CookingTimer {
    elapsed: Arc<AtomicU64>,
    ticker: Option<JoinHandle<()>>,
}

impl CookingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }

        debug!("Timer started at {}s", self.elapsed());
        let elapsed = self.elapsed.clone();

        self.ticker = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + TICK, TICK);

            loop {
                ticks.tick().await;
                elapsed.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    pub fn pause(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
            debug!("Timer paused at {}s", self.elapsed());
        }
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        self.pause();
        self.elapsed.store(0, Ordering::Relaxed);
    }

    pub fn display(&self) -> String {
        format_elapsed(self.elapsed())
    }
}

impl Drop for CookingTimer {
    fn drop(&mut self) {
        self.pause();
    }
}

/// `mm:ss`, minutes keep growing past 59.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;

    use super::{CookingTimer, format_elapsed};

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(75), "01:15");
        assert_eq!(format_elapsed(3600), "60:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_seconds() {
        let mut timer = CookingTimer::new();
        timer.start();

        sleep(Duration::from_millis(3500)).await;

        assert_eq!(timer.elapsed(), 3);
        assert!(timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_counting() {
        let mut timer = CookingTimer::new();
        timer.start();
        sleep(Duration::from_millis(2500)).await;

        timer.pause();
        sleep(Duration::from_secs(5)).await;

        assert_eq!(timer.elapsed(), 2);
        assert!(!timer.is_running());

        timer.toggle();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(timer.elapsed(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset() {
        let mut timer = CookingTimer::new();
        timer.start();
        sleep(Duration::from_millis(1500)).await;

        timer.reset();

        assert_eq!(timer.elapsed(), 0);
        assert!(!timer.is_running());
        assert_eq!(timer.display(), "00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_single_ticker() {
        let mut timer = CookingTimer::new();
        timer.start();
        timer.start();

        sleep(Duration::from_millis(2500)).await;

        assert_eq!(timer.elapsed(), 2);
    }
}
