//! Ctrl+C routing for the chat surface
//!
//! Once tokio listens for SIGINT the default handler is gone for the rest of
//! the process. The router restores it: an interrupt cancels the reply that
//! is currently armed, and ends the process when nothing is armed.

use std::sync::{Arc, Mutex, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Exit status for a process ended by SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Routes Ctrl+C to the pending chat reply
#[derive(Clone, Default)]
pub struct InterruptRouter {
    target: Arc<Mutex<Option<CancellationToken>>>,
}

impl InterruptRouter {
    /// Start listening for Ctrl+C on the current runtime
    pub fn install() -> Self {
        let router = Self::default();
        let listener = router.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                if !listener.interrupt() {
                    std::process::exit(INTERRUPTED_EXIT_CODE);
                }
            }
        });
        router
    }

    /// Cancel `token` on Ctrl+C until the returned guard is dropped
    pub fn arm(&self, token: CancellationToken) -> ArmedInterrupt<'_> {
        *self.lock() = Some(token);
        ArmedInterrupt { router: self }
    }

    /// Deliver one interrupt. Returns `false` when nothing was armed.
    pub fn interrupt(&self) -> bool {
        match self.lock().take() {
            Some(token) => {
                debug!("Interrupt cancels pending reply");
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.target.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Disarms the router when dropped
pub struct ArmedInterrupt<'a> {
    router: &'a InterruptRouter,
}

impl Drop for ArmedInterrupt<'_> {
    fn drop(&mut self) {
        *self.router.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_cancels_armed_token() {
        let router = InterruptRouter::default();
        let token = CancellationToken::new();

        let _armed = router.arm(token.clone());

        assert!(router.interrupt());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_interrupt_without_armed_token_falls_through() {
        let router = InterruptRouter::default();
        assert!(!router.interrupt());
    }

    #[test]
    fn test_dropping_guard_disarms() {
        let router = InterruptRouter::default();
        let token = CancellationToken::new();

        drop(router.arm(token.clone()));

        assert!(!router.interrupt());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_interrupt_is_delivered_once() {
        let router = InterruptRouter::default();
        let _armed = router.arm(CancellationToken::new());

        assert!(router.interrupt());
        assert!(!router.interrupt());
    }
}
