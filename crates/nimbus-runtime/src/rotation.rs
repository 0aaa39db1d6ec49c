//! Eased rotation controllers
//!
//! Raw sensor angles are jittery and jump when the device moves quickly.
//! Each axis is therefore driven by a [`DelayRotateController`] that chases
//! the latest target with bounded acceleration and brakes before arriving.

use serde::{Deserialize, Serialize};

/// Acceleration magnitude in degrees per ms²
const DEFAULT_ABS_ACCELERATION: f64 = 90.0 / 200.0 / 800.0;

/// Follows a target angle with constant acceleration, braking near the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayRotateController {
    target: f64,
    current: f64,
    velocity: f64,
    acceleration: f64,
    /// Keep angles in (-180, 180] and always take the short way around
    wrap: bool,
}

impl DelayRotateController {
    pub fn new(initial: f64) -> Self {
        Self {
            target: initial,
            current: initial,
            velocity: 0.0,
            acceleration: 0.0,
            wrap: false,
        }
    }

    /// Controller for a full-circle angle that wraps at ±180 degrees
    pub fn wrapping(initial: f64) -> Self {
        Self {
            wrap: true,
            ..Self::new(normalize(initial))
        }
    }

    pub fn rotation(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Chase `target` for `interval_ms` of simulated time
    pub fn update(&mut self, target: f64, interval_ms: f64) {
        if target.is_finite() {
            self.target = target;
        }
        if self.wrap {
            self.target = self.current + normalize(self.target - self.current);
        }

        let gap = self.target - self.current;
        if gap == 0.0 {
            self.settle();
            return;
        }
        if !(interval_ms > 0.0) {
            return;
        }

        let t = interval_ms;
        let direction = gap.signum();
        // Time until the velocity would reach zero under the chosen acceleration
        let mut stop_time = f64::INFINITY;

        let distance = if self.velocity == 0.0 || gap * self.velocity < 0.0 {
            // Start moving, or turn around
            self.acceleration = direction * DEFAULT_ABS_ACCELERATION;
            self.velocity = self.acceleration * t;
            self.acceleration * t * t / 2.0
        } else if self.velocity * self.velocity / (2.0 * DEFAULT_ABS_ACCELERATION) < gap.abs() {
            // Still far enough away to speed up
            self.acceleration = direction * DEFAULT_ABS_ACCELERATION;
            let d = self.velocity * t + self.acceleration * t * t / 2.0;
            self.velocity += self.acceleration * t;
            d
        } else {
            // Brake so the velocity reaches zero right at the target
            self.acceleration = -direction * self.velocity * self.velocity / (2.0 * gap.abs());
            stop_time = (self.velocity / self.acceleration).abs();
            let d = self.velocity * t + self.acceleration * t * t / 2.0;
            self.velocity += self.acceleration * t;
            d
        };

        if t >= stop_time || distance.abs() >= gap.abs() || !distance.is_finite() {
            self.current = self.target;
            self.settle();
        } else {
            self.current += distance;
        }

        if self.wrap {
            let wrapped = normalize(self.current);
            self.target += wrapped - self.current;
            self.current = wrapped;
        }
    }

    fn settle(&mut self) {
        self.velocity = 0.0;
        self.acceleration = 0.0;
    }
}

/// Map an angle into (-180, 180]
fn normalize(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let mut d = degrees % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// The two eased device-rotation angles the particle models consume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationState {
    pub rotation_2d: DelayRotateController,
    pub rotation_3d: DelayRotateController,
}

impl RotationState {
    pub fn new() -> Self {
        Self {
            rotation_2d: DelayRotateController::wrapping(0.0),
            rotation_3d: DelayRotateController::new(0.0),
        }
    }

    /// Advance both controllers toward `targets` (2D, 3D) by `interval_ms`
    pub fn advance(&mut self, targets: (f32, f32), interval_ms: f64) {
        self.rotation_2d.update(targets.0 as f64, interval_ms);
        self.rotation_3d.update(targets.1 as f64, interval_ms);
    }

    /// Current (rotation_2d, rotation_3d) in degrees
    pub fn angles(&self) -> (f32, f32) {
        (
            self.rotation_2d.rotation() as f32,
            self.rotation_3d.rotation() as f32,
        )
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(controller: &mut DelayRotateController, target: f64, ticks: usize) {
        for _ in 0..ticks {
            controller.update(target, 16.0);
        }
    }

    #[test]
    fn reaches_target_and_stops() {
        let mut c = DelayRotateController::new(0.0);
        run(&mut c, 90.0, 200);
        assert!((c.rotation() - 90.0).abs() < 1e-9);
        assert_eq!(c.velocity(), 0.0);
    }

    #[test]
    fn movement_is_delayed_not_instant() {
        let mut c = DelayRotateController::new(0.0);
        c.update(90.0, 16.0);
        assert!(c.rotation() > 0.0);
        assert!(c.rotation() < 1.0);
    }

    #[test]
    fn never_overshoots_monotonic_approach() {
        let mut c = DelayRotateController::new(0.0);
        let mut last = 0.0;
        for _ in 0..300 {
            c.update(45.0, 16.0);
            assert!(c.rotation() >= last - 1e-9);
            assert!(c.rotation() <= 45.0 + 1e-9);
            last = c.rotation();
        }
    }

    #[test]
    fn turns_around_when_target_flips() {
        let mut c = DelayRotateController::new(0.0);
        run(&mut c, 60.0, 10);
        assert!(c.velocity() > 0.0);
        c.update(-60.0, 16.0);
        assert!(c.velocity() < 0.0);
        run(&mut c, -60.0, 300);
        assert!((c.rotation() + 60.0).abs() < 1e-9);
    }

    #[test]
    fn zero_or_negative_interval_is_a_no_op() {
        let mut c = DelayRotateController::new(10.0);
        c.update(50.0, 0.0);
        assert_eq!(c.rotation(), 10.0);
        c.update(50.0, -5.0);
        assert_eq!(c.rotation(), 10.0);
    }

    #[test]
    fn huge_interval_snaps_to_target() {
        let mut c = DelayRotateController::new(0.0);
        run(&mut c, 30.0, 5);
        c.update(30.0, 1_000_000.0);
        assert_eq!(c.rotation(), 30.0);
        assert_eq!(c.velocity(), 0.0);
    }

    #[test]
    fn wrapping_takes_short_way_round() {
        let mut c = DelayRotateController::wrapping(170.0);
        c.update(-170.0, 16.0);
        // Short path is +20 degrees across the seam
        assert!(c.rotation() > 170.0 || c.rotation() < -170.0);
        for _ in 0..300 {
            c.update(-170.0, 16.0);
        }
        assert!((c.rotation() + 170.0).abs() < 1e-9);
    }

    #[test]
    fn non_finite_target_is_ignored() {
        let mut c = DelayRotateController::new(5.0);
        c.update(f64::NAN, 16.0);
        assert_eq!(c.rotation(), 5.0);
    }

    #[test]
    fn rotation_state_settles_to_rest() {
        let mut state = RotationState::new();
        for _ in 0..100 {
            state.advance((40.0, -20.0), 16.0);
        }
        for _ in 0..300 {
            state.advance((0.0, 0.0), 16.0);
        }
        let (r2d, r3d) = state.angles();
        assert!(r2d.abs() < 1e-6);
        assert!(r3d.abs() < 1e-6);
    }

    #[test]
    fn rotation_state_round_trips_through_toml() {
        let mut state = RotationState::new();
        state.advance((30.0, 10.0), 16.0);
        let text = toml::to_string(&state).unwrap();
        let back: RotationState = toml::from_str(&text).unwrap();
        assert_eq!(back, state);
    }
}
