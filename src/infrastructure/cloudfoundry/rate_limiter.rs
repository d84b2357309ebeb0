use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Token bucket shared by every outbound platform request.
///
/// The bucket starts full with `max(rate, 1)` tokens and refills continuously
/// at `rate` tokens per second.
pub struct TokenBucketRateLimiter {
    state: Mutex<Bucket>,
    capacity: f64,
    refill_rate: f64,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucketRateLimiter {
    /// Create a limiter allowing `requests_per_second` sustained requests
    ///
    /// # Example
    /// ```
    /// use placement_report::infrastructure::cloudfoundry::TokenBucketRateLimiter;
    ///
    /// let rate_limiter = TokenBucketRateLimiter::new(20.0);
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        assert!(requests_per_second > 0.0, "Rate limit must be positive");

        let capacity = requests_per_second.max(1.0);
        Self {
            state: Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
            capacity,
            refill_rate: requests_per_second,
        }
    }

    /// Take one token, sleeping until one is available.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.state.lock().await;
                let now = Instant::now();
                let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
                let tokens = (bucket.tokens + elapsed * self.refill_rate).min(self.capacity);

                if tokens >= 1.0 {
                    bucket.tokens = tokens - 1.0;
                    bucket.last_refill = now;
                    return;
                }

                let tokens_needed = 1.0 - tokens;
                Duration::from_secs_f64((tokens_needed / self.refill_rate).max(0.001))
            };

            sleep(wait).await;
        }
    }

    #[cfg(test)]
    async fn available_tokens(&self) -> f64 {
        let bucket = self.state.lock().await;
        let elapsed = bucket.last_refill.elapsed().as_secs_f64();
        (bucket.tokens + elapsed * self.refill_rate).min(self.capacity)
    }
}
