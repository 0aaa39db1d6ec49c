//! Interpolation and envelope curves shared by the particle models

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// `elapsed / duration` clamped to [0, 1]. A zero-length (or negative)
/// duration counts as already complete.
pub fn progress_fraction(elapsed: f32, duration: f32) -> f32 {
    if !(duration > 0.0) {
        return 1.0;
    }
    let t = elapsed / duration;
    if t.is_nan() {
        1.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Triangular 0 → 1 → 0 envelope over a fraction in [0, 1]
pub fn triangle(fraction: f32) -> f32 {
    let f = fraction.clamp(0.0, 1.0);
    if f < 0.5 {
        f * 2.0
    } else {
        (1.0 - f) * 2.0
    }
}

/// Double flash: rise, fall, rise, fall, each over a quarter of `duration`.
/// Zero outside [0, duration).
pub fn flash_envelope(progress: f32, duration: f32) -> f32 {
    if !(progress >= 0.0) || progress >= duration {
        return 0.0;
    }
    let q = progress_fraction(progress, duration) * 4.0;
    if q < 1.0 {
        q
    } else if q < 2.0 {
        2.0 - q
    } else if q < 3.0 {
        q - 2.0
    } else {
        4.0 - q
    }
}

/// Advance a cyclic timer, wrapping at `duration`
pub fn advance_cycle(progress: f32, interval: f32, duration: f32) -> f32 {
    if !(duration > 0.0) {
        return 0.0;
    }
    (progress + interval.max(0.0)) % duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_is_complete() {
        assert_eq!(progress_fraction(5.0, 0.0), 1.0);
        assert_eq!(progress_fraction(0.0, 0.0), 1.0);
        assert_eq!(progress_fraction(5.0, -1.0), 1.0);
        assert_eq!(advance_cycle(3.0, 5.0, 0.0), 0.0);
    }

    #[test]
    fn triangle_peaks_in_middle() {
        assert_eq!(triangle(0.0), 0.0);
        assert!((triangle(0.25) - 0.5).abs() < 1e-6);
        assert_eq!(triangle(0.5), 1.0);
        assert!((triangle(0.75) - 0.5).abs() < 1e-6);
        assert_eq!(triangle(1.0), 0.0);
    }

    #[test]
    fn flash_has_two_peaks() {
        let d = 300.0;
        assert_eq!(flash_envelope(0.0, d), 0.0);
        assert!((flash_envelope(75.0, d) - 1.0).abs() < 1e-5);
        assert!(flash_envelope(150.0, d).abs() < 1e-5);
        assert!((flash_envelope(225.0, d) - 1.0).abs() < 1e-5);
        assert_eq!(flash_envelope(300.0, d), 0.0);
        assert_eq!(flash_envelope(1000.0, d), 0.0);
        assert_eq!(flash_envelope(-1.0, d), 0.0);
    }

    #[test]
    fn cycle_wraps() {
        assert!((advance_cycle(900.0, 200.0, 1000.0) - 100.0).abs() < 1e-3);
    }
}
