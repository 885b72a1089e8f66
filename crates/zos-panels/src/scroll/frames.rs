//! Frame scheduling

use serde::{Deserialize, Serialize};

/// Identifies one requested animation frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameToken(pub u64);

/// Source of animation frames (`requestAnimationFrame` in the browser)
///
/// A requested frame is delivered back to whoever asked for it together
/// with its token; a cancelled token is never delivered.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Frame scheduler driven by hand, for headless use and tests
#[derive(Clone, Debug, Default)]
pub struct ManualFrames {
    pending: Vec<FrameToken>,
    next: u64,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested and not yet cancelled or taken
    pub fn pending(&self) -> &[FrameToken] {
        &self.pending
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.contains(&token)
    }

    /// Take the oldest pending frame for delivery
    pub fn next_frame(&mut self) -> Option<FrameToken> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameToken {
        self.next += 1;
        let token = FrameToken(self.next);
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|t| *t != token);
    }
}
