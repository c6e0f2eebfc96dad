use std::thread;
use std::time::Duration;
use log::debug;

/// Fixed courtesy pause inserted after each search call.
#[derive(Debug, Clone, Copy)]
pub struct SearchDelay {
    delay: Duration,
}

impl SearchDelay {
    pub fn new(delay: Duration) -> Self {
        SearchDelay { delay }
    }

    pub fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!("Waiting {} ms (search delay)...", self.delay.as_millis());
        thread::sleep(self.delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_pause_waits_at_least_the_delay() {
        let delay = SearchDelay::new(Duration::from_millis(20));
        let start = Instant::now();
        delay.pause();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_zero_delay_returns_immediately() {
        let start = Instant::now();
        SearchDelay::new(Duration::ZERO).pause();
        assert!(start.elapsed() < Duration::from_millis(20));
    }
}
