//! Reveal pacing port
//!
//! Decouples the streaming reveal from its timing mechanism.

use async_trait::async_trait;

/// Waits between two frames of a streaming reveal
#[async_trait]
pub trait RevealPacer: Send + Sync {
    /// Called before each frame is shown
    async fn pause(&self);
}

/// Pacer that never waits
///
/// Used when the reveal delay is configured to zero, and in tests.
pub struct ImmediatePacer;

#[async_trait]
impl RevealPacer for ImmediatePacer {
    async fn pause(&self) {}
}
