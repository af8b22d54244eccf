//! Wheel-driven smooth scrolling.
//!
//! The controller never touches the page itself: input handlers feed it wheel
//! (and optionally touch) deltas, and the frame loop asks it for the next
//! position to write.

use crate::config::ScrollSettings;
use crate::easing::Ease;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Glide {
    from: f64,
    to: f64,
    started_at: f64,
}

#[derive(Clone, Debug)]
pub struct SmoothScroll {
    settings: ScrollSettings,
    ease: Ease,
    state: DriverState,
    current: f64,
    target: f64,
    limit: f64,
    glide: Option<Glide>,
}

impl SmoothScroll {
    pub fn new(settings: ScrollSettings) -> Self {
        Self {
            settings,
            ease: Ease::ExpoScroll,
            state: DriverState::Running,
            current: 0.0,
            target: 0.0,
            limit: 0.0,
            glide: None,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == DriverState::Stopped
    }

    pub fn position(&self) -> f64 {
        self.current
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    pub fn smooth_touch(&self) -> bool {
        self.settings.smooth_touch
    }

    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
        self.glide = None;
        self.target = self.current;
    }

    pub fn start(&mut self) {
        self.state = DriverState::Running;
    }

    /// Largest reachable scroll offset (document height minus viewport).
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.current = self.current.min(self.limit);
        self.target = self.target.min(self.limit);
        if let Some(glide) = self.glide.as_mut() {
            glide.to = glide.to.min(self.limit);
        }
    }

    /// Adopts a position that changed outside the controller (scrollbar drag,
    /// keyboard, native touch). Ignored while a glide is in flight.
    pub fn sync(&mut self, native_position: f64) {
        if self.glide.is_some() {
            return;
        }
        let position = native_position.clamp(0.0, self.limit);
        self.current = position;
        self.target = position;
    }

    /// Returns `false` when the controller is stopped and the input must be
    /// swallowed without moving the page.
    pub fn on_wheel(&mut self, delta_y: f64, now: f64) -> bool {
        self.push(delta_y * self.settings.wheel_multiplier, now)
    }

    pub fn on_touch(&mut self, delta_y: f64, now: f64) -> bool {
        if !self.settings.smooth_touch {
            return false;
        }
        self.push(delta_y * self.settings.touch_multiplier, now)
    }

    fn push(&mut self, delta: f64, now: f64) -> bool {
        if self.is_stopped() {
            return false;
        }

        self.target = (self.target + delta).clamp(0.0, self.limit);
        self.glide = Some(Glide {
            from: self.current,
            to: self.target,
            started_at: now,
        });
        true
    }

    /// Advances the glide to `now` (milliseconds). Yields the position to
    /// write when it moved this frame.
    pub fn raf(&mut self, now: f64) -> Option<f64> {
        if self.is_stopped() {
            return None;
        }
        let glide = self.glide?;

        let duration_ms = self.settings.duration_seconds * 1_000.0;
        let t = ((now - glide.started_at) / duration_ms).clamp(0.0, 1.0);
        let next = if t >= 1.0 {
            self.glide = None;
            glide.to
        } else {
            glide.from + (glide.to - glide.from) * self.ease.apply(t)
        };

        let moved = (next - self.current).abs() > f64::EPSILON;
        self.current = next;
        moved.then_some(next)
    }
}
