//! Gravity-sensor orientation filter
//!
//! Converts raw 3-axis gravity samples into two angles in degrees:
//! - `rotation_2d`: in-plane rotation ("which way is down" on the screen)
//! - `rotation_3d`: tilt toward or away from the viewer

/// Lower bound of the near-vertical band where in-plane readings are damped
const DAMPING_BAND_LOW: f64 = 60.0;
/// Upper bound of the near-vertical band
const DAMPING_BAND_HIGH: f64 = 120.0;

/// Latest target angles derived from the gravity sensor
#[derive(Debug, Clone)]
pub struct OrientationFilter {
    enabled: bool,
    rotation_2d: f32,
    rotation_3d: f32,
}

impl OrientationFilter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            rotation_2d: 0.0,
            rotation_3d: 0.0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable orientation input. Disabling zeroes both targets
    /// so the rotation controllers ease back to rest.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.rotation_2d = 0.0;
            self.rotation_3d = 0.0;
        }
    }

    /// Feed one gravity sample: `ax` left/right, `ay` up/down, `az` forward/back
    pub fn feed(&mut self, ax: f32, ay: f32, az: f32) {
        if !self.enabled {
            self.rotation_2d = 0.0;
            self.rotation_3d = 0.0;
            return;
        }
        let (r2d, r3d) = compute_angles(ax as f64, ay as f64, az as f64);
        self.rotation_2d = r2d as f32;
        self.rotation_3d = r3d as f32;
    }

    /// Current (rotation_2d, rotation_3d) targets in degrees
    pub fn current_angles(&self) -> (f32, f32) {
        if self.enabled {
            (self.rotation_2d, self.rotation_3d)
        } else {
            (0.0, 0.0)
        }
    }
}

impl Default for OrientationFilter {
    fn default() -> Self {
        Self::new(true)
    }
}

fn compute_angles(ax: f64, ay: f64, az: f64) -> (f64, f64) {
    let g2d = (ax * ax + ay * ay).sqrt();
    let g3d = (ax * ax + ay * ay + az * az).sqrt();

    let cos_2d = clamp_cos(ay / g2d);
    let cos_3d = clamp_cos(g2d * sign(ay) / g3d);

    let mut rotation_2d = cos_2d.acos().to_degrees() * sign(ax);
    let rotation_3d = cos_3d.acos().to_degrees() * sign(az);

    let tilt = rotation_3d.abs();
    if DAMPING_BAND_LOW < tilt && tilt < DAMPING_BAND_HIGH {
        rotation_2d *= (tilt - 90.0).abs() / 30.0;
    }

    (finite_or_zero(rotation_2d), finite_or_zero(rotation_3d))
}

/// Clamp an `acos` argument into [-1, 1]; non-finite values (zero gravity,
/// NaN samples) read as an upright device.
fn clamp_cos(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        1.0
    }
}

/// 1 for non-negative values, -1 otherwise. NaN counts as non-negative.
fn sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn standing_device_is_at_rest() {
        let mut filter = OrientationFilter::new(true);
        for _ in 0..10 {
            filter.feed(0.0, 1.0, 0.0);
        }
        let (r2d, r3d) = filter.current_angles();
        assert!(approx(r2d, 0.0));
        assert!(approx(r3d, 0.0));
    }

    #[test]
    fn zero_vector_yields_zero() {
        let mut filter = OrientationFilter::new(true);
        filter.feed(0.0, 0.0, 0.0);
        assert_eq!(filter.current_angles(), (0.0, 0.0));
    }

    #[test]
    fn non_finite_samples_do_not_propagate() {
        let mut filter = OrientationFilter::new(true);
        filter.feed(f32::NAN, 1.0, 0.0);
        let (r2d, r3d) = filter.current_angles();
        assert!(r2d.is_finite() && r3d.is_finite());

        filter.feed(f32::INFINITY, f32::NEG_INFINITY, f32::NAN);
        let (r2d, r3d) = filter.current_angles();
        assert!(r2d.is_finite() && r3d.is_finite());
    }

    #[test]
    fn landscape_tilt_is_ninety_degrees_in_plane() {
        let mut filter = OrientationFilter::new(true);
        filter.feed(9.8, 0.0, 0.0);
        let (r2d, r3d) = filter.current_angles();
        assert!(approx(r2d, 90.0));
        assert!(approx(r3d, 0.0));

        filter.feed(-9.8, 0.0, 0.0);
        assert!(approx(filter.current_angles().0, -90.0));
    }

    #[test]
    fn upside_down_is_one_eighty() {
        let mut filter = OrientationFilter::new(true);
        filter.feed(0.0, -9.8, 0.0);
        let (r2d, _) = filter.current_angles();
        assert!(approx(r2d, 180.0));
    }

    #[test]
    fn toward_viewer_tilt_sign_follows_az() {
        let mut filter = OrientationFilter::new(true);
        // 45 degrees back
        filter.feed(0.0, 1.0, 1.0);
        assert!(approx(filter.current_angles().1, 45.0));
        filter.feed(0.0, 1.0, -1.0);
        assert!(approx(filter.current_angles().1, -45.0));
    }

    #[test]
    fn near_flat_damps_in_plane_rotation() {
        let mut filter = OrientationFilter::new(true);
        // Nearly flat on its back with a sideways component:
        // rotation_3d is 84.3 degrees, inside the damping band
        filter.feed(0.1, 0.0, 1.0);
        let (r2d, r3d) = filter.current_angles();
        assert!(r3d > 60.0 && r3d < 120.0);
        let undamped = 90.0;
        let expected = undamped * ((r3d.abs() - 90.0).abs() / 30.0);
        assert!(approx(r2d, expected));
        assert!(r2d < undamped);
    }

    #[test]
    fn disabled_filter_reports_zero() {
        let mut filter = OrientationFilter::new(true);
        filter.feed(9.8, 0.0, 3.0);
        filter.set_enabled(false);
        assert_eq!(filter.current_angles(), (0.0, 0.0));
        filter.feed(9.8, 0.0, 3.0);
        assert_eq!(filter.current_angles(), (0.0, 0.0));
    }

    #[test]
    fn acos_arguments_stay_in_range() {
        for &(ax, ay, az) in &[
            (1e-30, 1e30, 0.0),
            (-1e30, 1e-30, 1e30),
            (0.0, -0.0, 0.0),
            (f64::MIN_POSITIVE, f64::MIN_POSITIVE, f64::MIN_POSITIVE),
        ] {
            let (r2d, r3d) = compute_angles(ax, ay, az);
            assert!(r2d.is_finite() && r3d.is_finite());
            assert!(r2d.abs() <= 180.0 && r3d.abs() <= 180.0);
        }
    }
}
