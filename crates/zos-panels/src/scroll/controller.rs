//! Animated scrolling of one scroll container

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, PanelError};
use crate::math::Vec2;
use crate::port::{ElementId, GeometryPort};

use super::{Easing, FrameScheduler, FrameToken};

/// Default animation duration
pub const DEFAULT_SCROLL_DURATION_MS: f64 = 300.0;

/// Options for a [`ScrollController`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollOptions {
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_SCROLL_DURATION_MS,
            easing: Easing::default(),
        }
    }
}

impl ScrollOptions {
    pub fn validate(&self) -> Result<(), PanelError> {
        check_non_negative("durationMs", self.duration_ms as f32)
    }
}

/// In-flight scroll animation
#[derive(Clone, Copy, Debug)]
struct ScrollAnimation {
    from: Vec2,
    to: Vec2,
    start_ms: f64,
    /// Frame the next step runs on
    frame: FrameToken,
}

impl ScrollAnimation {
    /// Get animation progress (0.0 to 1.0)
    fn progress(&self, now_ms: f64, duration_ms: f64) -> f32 {
        if duration_ms <= 0.0 {
            return 1.0;
        }
        let t = (now_ms - self.start_ms) / duration_ms;
        if t.is_nan() {
            1.0
        } else {
            t.clamp(0.0, 1.0) as f32
        }
    }
}

/// Eases a scroll container to a target offset, one step per frame
///
/// A new `scroll_to` replaces the running animation; frames requested for
/// it are cancelled and ignored if delivered anyway.
#[derive(Debug)]
pub struct ScrollController {
    element: ElementId,
    options: ScrollOptions,
    animation: Option<ScrollAnimation>,
}

impl ScrollController {
    pub fn new<P: GeometryPort + ?Sized>(
        element: ElementId,
        options: ScrollOptions,
        port: &P,
    ) -> Result<Self, PanelError> {
        options.validate()?;
        if port.rect(element).is_none() {
            return Err(PanelError::MissingElement(element));
        }
        Ok(Self {
            element,
            options,
            animation: None,
        })
    }

    #[inline]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Check if an animation is running
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Frame the running animation waits for
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.animation.map(|a| a.frame)
    }

    /// Target of the running animation
    pub fn target(&self) -> Option<Vec2> {
        self.animation.map(|a| a.to)
    }

    /// Start animating towards `target` from the current offset
    pub fn scroll_to<P, F>(&mut self, target: Vec2, now_ms: f64, port: &P, frames: &mut F) -> FrameToken
    where
        P: GeometryPort + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        self.stop(frames);
        let from = port.scroll_offset(self.element);
        let frame = frames.request_frame();
        self.animation = Some(ScrollAnimation {
            from,
            to: target.or_zero(),
            start_ms: now_ms,
            frame,
        });
        log::debug!("scroll {} from {:?} to {:?}", self.element, from, target);
        frame
    }

    /// Start animating by `delta` relative to the current offset
    pub fn scroll_by<P, F>(&mut self, delta: Vec2, now_ms: f64, port: &P, frames: &mut F) -> FrameToken
    where
        P: GeometryPort + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let target = port.scroll_offset(self.element) + delta.or_zero();
        self.scroll_to(target, now_ms, port, frames)
    }

    /// Run one animation step for a delivered frame
    ///
    /// Returns `true` while the animation continues. Tokens other than the
    /// pending one are ignored.
    pub fn on_frame<P, F>(&mut self, token: FrameToken, now_ms: f64, port: &mut P, frames: &mut F) -> bool
    where
        P: GeometryPort + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        if animation.frame != token {
            log::trace!("scroll {} ignoring stale frame {:?}", self.element, token);
            return false;
        }

        let progress = animation.progress(now_ms, self.options.duration_ms);
        let eased = self.options.easing.apply(progress);
        let offset = if progress >= 1.0 {
            animation.to
        } else {
            Vec2::lerp(animation.from, animation.to, eased)
        };
        port.set_scroll_offset(self.element, offset);

        if progress >= 1.0 {
            self.animation = None;
            return false;
        }
        animation.frame = frames.request_frame();
        true
    }

    /// Cancel the running animation, leaving the offset where it is
    pub fn stop<F: FrameScheduler + ?Sized>(&mut self, frames: &mut F) {
        if let Some(animation) = self.animation.take() {
            frames.cancel_frame(animation.frame);
        }
    }
}
