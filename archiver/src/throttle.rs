use std::time::Duration;

/// Fixed delay between requests to the remote service. There is no backoff
/// and no jitter; each caller owns its own throttle and interval.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    primed: bool,
}

impl Throttle {
    pub const fn new(interval: Duration) -> Throttle {
        Throttle {
            interval,
            primed: false,
        }
    }

    /// Waits out the interval before every call except the first.
    pub async fn between(&mut self) {
        if self.primed {
            self.pause().await;
        } else {
            self.primed = true;
        }
    }

    /// Waits out the interval unconditionally.
    pub async fn pause(&self) {
        if !self.interval.is_zero() {
            tokio::time::sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_first_call_does_not_wait() {
        let mut throttle = Throttle::new(Duration::from_secs(1));
        let start = Instant::now();

        throttle.between().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        throttle.between().await;
        throttle.between().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_always_waits() {
        let throttle = Throttle::new(Duration::from_millis(200));
        let start = Instant::now();

        throttle.pause().await;
        throttle.pause().await;
        assert_eq!(start.elapsed(), Duration::from_millis(400));
    }
}
