use std::time::Duration;
use tokio::time::sleep;

/// Spaces out consecutive requests so the site does not flag the scraper.
/// The first request goes out immediately.
pub struct RateLimiter {
    delay: Duration,
    request_count: usize,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            request_count: 0,
        }
    }

    pub async fn wait(&mut self) {
        if self.should_wait() {
            sleep(self.delay).await;
        }
        self.request_count += 1;
    }

    pub fn request_count(&self) -> usize {
        self.request_count
    }

    fn should_wait(&self) -> bool {
        self.request_count > 0 && !self.delay.is_zero()
    }
}
