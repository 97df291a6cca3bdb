//! Frame-driven actions: timed moves, looping scrolls, repeating timers
//!
//! Each action is advanced with a scaled `dt`. Scaling by zero is how the
//! world freezes on game over; nothing here reads a clock.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::wrap;

/// Move by a fixed offset over a duration, then report completion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveThenRemove {
    /// Offset per second
    pub velocity: Vec2,
    /// Seconds of movement left
    pub remaining: f32,
}

impl MoveThenRemove {
    pub fn new(offset: Vec2, duration: f32) -> Self {
        if duration <= 0.0 {
            return Self {
                velocity: Vec2::ZERO,
                remaining: 0.0,
            };
        }
        Self {
            velocity: offset / duration,
            remaining: duration,
        }
    }

    /// Advance; returns the displacement for this step
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        let step = dt.min(self.remaining).max(0.0);
        self.remaining -= step;
        self.velocity * step
    }

    /// True once the move has run its full duration
    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Endless leftward scroll of a tiled strip (ground, clouds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollLoop {
    pub tile_width: f32,
    /// Seconds to scroll one tile width
    pub period: f32,
    /// Current scroll offset in `[0, tile_width)`
    pub offset: f32,
    pub tile_count: usize,
}

impl ScrollLoop {
    pub fn new(tile_width: f32, period: f32, span: f32) -> Self {
        Self {
            tile_width,
            period,
            offset: 0.0,
            tile_count: crate::tiles_needed(span, tile_width),
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if self.period <= 0.0 {
            return;
        }
        let speed = self.tile_width / self.period;
        self.offset = wrap(self.offset + speed * dt, self.tile_width);
    }

    /// Left edges of the visible tiles
    pub fn tile_positions(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.tile_count).map(move |i| i as f32 * self.tile_width - self.offset)
    }
}

/// Repeating timer that fires at t=0 and then every `period`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatTimer {
    pub period: f32,
    /// Seconds until the next firing
    pub until_next: f32,
}

impl RepeatTimer {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            until_next: 0.0,
        }
    }

    /// Advance; returns how many times the timer fired
    ///
    /// Negative `dt` is ignored. The count is computed in one step, so a huge
    /// `dt` cannot stall.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.until_next -= dt.max(0.0);
        if self.until_next > 0.0 {
            return 0;
        }
        if self.period <= 0.0 {
            // Degenerate period: fire once per step at most
            self.until_next = 0.0;
            return 1;
        }
        let overdue = -self.until_next;
        let fired = (overdue / self.period).floor() as u32 + 1;
        self.until_next = self.period - overdue.rem_euclid(self.period);
        if self.until_next <= 0.0 {
            self.until_next = self.period;
        }
        fired
    }
}

/// Rotate by a fixed angle over a duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    /// Radians per second
    pub rate: f32,
    pub remaining: f32,
}

impl Spin {
    pub fn new(angle: f32, duration: f32) -> Self {
        if duration <= 0.0 {
            return Self {
                rate: 0.0,
                remaining: 0.0,
            };
        }
        Self {
            rate: angle / duration,
            remaining: duration,
        }
    }

    /// Advance; returns the rotation delta for this step
    pub fn advance(&mut self, dt: f32) -> f32 {
        let step = dt.min(self.remaining).max(0.0);
        self.remaining -= step;
        self.rate * step
    }

    pub fn is_done(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Two-frame wing animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlapAnimation {
    pub frame_time: f32,
    pub elapsed: f32,
    /// 0 = wings up, 1 = wings down
    pub frame: u8,
}

impl FlapAnimation {
    pub fn new(frame_time: f32) -> Self {
        Self {
            frame_time,
            elapsed: 0.0,
            frame: 0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if self.frame_time <= 0.0 {
            return;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed < self.frame_time {
            return;
        }
        let flips = (self.elapsed / self.frame_time).floor() as u64;
        self.elapsed = self.elapsed.rem_euclid(self.frame_time);
        if flips % 2 == 1 {
            self.frame ^= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_then_remove_covers_offset() {
        let mut mv = MoveThenRemove::new(Vec2::new(-435.0, 0.0), 4.0);
        let mut total = Vec2::ZERO;
        for _ in 0..500 {
            total += mv.advance(0.01);
        }
        assert!(mv.is_done());
        assert!((total.x + 435.0).abs() < 0.1);
    }

    #[test]
    fn test_move_then_remove_frozen() {
        let mut mv = MoveThenRemove::new(Vec2::new(-100.0, 0.0), 1.0);
        assert_eq!(mv.advance(0.0), Vec2::ZERO);
        assert!(!mv.is_done());
    }

    #[test]
    fn test_scroll_loop_wraps() {
        let mut strip = ScrollLoop::new(336.0, 5.0, 375.0);
        assert_eq!(strip.tile_count, 4);
        strip.advance(2.5);
        assert!((strip.offset - 168.0).abs() < 0.01);
        strip.advance(2.5);
        assert!(strip.offset.abs() < 0.01 || (strip.offset - 336.0).abs() < 0.01);
        let first = strip.tile_positions().next().unwrap();
        assert!(first <= 0.0);
    }

    #[test]
    fn test_repeat_timer_fires_immediately_then_periodically() {
        let mut timer = RepeatTimer::new(2.0);
        assert_eq!(timer.advance(0.0), 1);
        assert_eq!(timer.advance(1.9), 0);
        assert_eq!(timer.advance(0.2), 1);
        assert_eq!(timer.advance(4.0), 2);
    }

    #[test]
    fn test_repeat_timer_paused() {
        let mut timer = RepeatTimer::new(2.0);
        timer.advance(0.0);
        for _ in 0..1000 {
            assert_eq!(timer.advance(0.0), 0);
        }
    }

    #[test]
    fn test_repeat_timer_huge_step() {
        let mut timer = RepeatTimer::new(2.0);
        timer.advance(0.0);
        let fired = timer.advance(1.0e8);
        assert!(fired >= 49_999_990, "fired {fired}");
        assert!(timer.until_next > 0.0 && timer.until_next <= 2.0);
    }

    #[test]
    fn test_repeat_timer_ignores_negative_step() {
        let mut timer = RepeatTimer::new(2.0);
        timer.advance(0.0);
        timer.advance(0.5);
        assert_eq!(timer.advance(-5.0), 0);
        assert!((timer.until_next - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_spin_total_angle() {
        let mut spin = Spin::new(3.0, 1.0);
        let mut angle = 0.0;
        while !spin.is_done() {
            angle += spin.advance(0.1);
        }
        assert!((angle - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_flap_animation_toggles() {
        let mut anim = FlapAnimation::new(0.2);
        anim.advance(0.1);
        assert_eq!(anim.frame, 0);
        anim.advance(0.1);
        assert_eq!(anim.frame, 1);
        anim.advance(0.4);
        assert_eq!(anim.frame, 1);
    }
}
