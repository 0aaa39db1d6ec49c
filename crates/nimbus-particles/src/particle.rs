//! Shared particle motion helpers
//!
//! Every model moves particles in diagonal space with speeds scaled by a
//! size class, and perturbs them with the change in toward-viewer tilt since
//! the previous tick.

use crate::rand::ParticleRng;
use nimbus_core::CanvasGeometry;

/// Size classes used for depth-of-field variety
pub const SCALES: [f32; 3] = [0.6, 0.8, 1.0];

/// Out-of-range rotation marking "no previous tick yet"
pub const INITIAL_ROTATION_3D: f32 = 1000.0;

/// Multiplier applied to the tilt perturbation
const TILT_PUSH: f32 = 5.0;

/// Speed multiplier for a size class: nearer (larger) particles move faster
pub fn depth_factor(scale: f32) -> f32 {
    scale.powf(1.5)
}

/// Perturbation caused by a change of `delta_degrees` in toward-viewer tilt
pub fn tilt_push(delta_degrees: f32) -> f32 {
    TILT_PUSH * delta_degrees.to_radians().sin()
}

/// Alpha multiplier for particles given the transition and scroll ratios
pub fn particle_alpha(display_ratio: f32, scroll_ratio: f32) -> f32 {
    let alpha = display_ratio * (1.0 - scroll_ratio);
    if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

/// Size class index for particle `index` when the classes hold `counts`
/// particles each, in order
pub fn size_class(index: usize, counts: &[usize; 3]) -> usize {
    let mut end = 0;
    for (class, count) in counts.iter().enumerate() {
        end += count;
        if index < end {
            return class;
        }
    }
    SCALES.len() - 1
}

/// Uniform position inside the diagonal canvas
pub fn random_position(geometry: &CanvasGeometry, rng: &mut ParticleRng) -> (f32, f32) {
    (
        rng.range(0.0, geometry.canvas_size),
        rng.range(0.0, geometry.canvas_size),
    )
}

/// Entry coordinate just behind the leading edge, jittered across the
/// particle's own `extent`. Particles that leave in the same tick re-enter at
/// different depths instead of falling in lockstep.
pub fn entry_offset(extent: f32, rng: &mut ParticleRng) -> f32 {
    -rng.range(0.0, extent)
}

/// Remembers last tick's `rotation_3d` so motion reacts to tilt changes,
/// not to a static tilt
#[derive(Debug, Clone)]
pub struct TiltTracker {
    last_rotation_3d: f32,
}

impl TiltTracker {
    pub fn new() -> Self {
        Self {
            last_rotation_3d: INITIAL_ROTATION_3D,
        }
    }

    /// Change since the previous call; zero on the first call
    pub fn delta(&mut self, rotation_3d: f32) -> f32 {
        let rotation_3d = if rotation_3d.is_finite() {
            rotation_3d
        } else {
            0.0
        };
        let delta = if self.last_rotation_3d == INITIAL_ROTATION_3D {
            0.0
        } else {
            rotation_3d - self.last_rotation_3d
        };
        self.last_rotation_3d = rotation_3d;
        delta
    }
}

impl Default for TiltTracker {
    fn default() -> Self {
        Self::new()
    }
}
