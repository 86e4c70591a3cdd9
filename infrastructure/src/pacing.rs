//! Timer-backed reveal pacing

use async_trait::async_trait;
use botchat_application::{ImmediatePacer, RevealPacer};
use std::sync::Arc;
use std::time::Duration;

/// Default delay between revealed characters
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(15);

/// Sleeps a fixed delay before each reveal frame
#[derive(Debug, Clone, Copy)]
pub struct TokioRevealPacer {
    delay: Duration,
}

impl TokioRevealPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Pacer for a configured delay; zero means no pacing at all
    pub fn from_millis(delay_ms: u64) -> Arc<dyn RevealPacer> {
        if delay_ms == 0 {
            Arc::new(ImmediatePacer)
        } else {
            Arc::new(Self::new(Duration::from_millis(delay_ms)))
        }
    }
}

impl Default for TokioRevealPacer {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_DELAY)
    }
}

#[async_trait]
impl RevealPacer for TokioRevealPacer {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_pause_waits_at_least_the_delay() {
        let pacer = TokioRevealPacer::new(Duration::from_millis(20));
        let start = Instant::now();

        pacer.pause().await;

        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
