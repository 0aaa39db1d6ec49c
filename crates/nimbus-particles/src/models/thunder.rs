//! Periodic full-screen lightning flash

use crate::curves::flash_envelope;
use crate::rand::ParticleRng;
use nimbus_core::{Canvas, Color};

const FLASH_DURATION_MS: f32 = 300.0;
const MIN_DELAY_MS: f32 = 2000.0;
const MAX_DELAY_MS: f32 = 7000.0;

/// A double flash followed by a random 2–7 s pause, repeating forever
#[derive(Debug, Clone)]
pub struct Thunder {
    color: Color,
    progress: f32,
    duration: f32,
    delay: f32,
    rng: ParticleRng,
}

impl Thunder {
    pub fn new(rng: ParticleRng) -> Self {
        let mut thunder = Self {
            color: Color::rgb(81, 67, 168),
            progress: 0.0,
            duration: FLASH_DURATION_MS,
            delay: 0.0,
            rng,
        };
        thunder.restart();
        thunder
    }

    fn restart(&mut self) {
        self.progress = 0.0;
        self.duration = FLASH_DURATION_MS;
        self.delay = self.rng.range(MIN_DELAY_MS, MAX_DELAY_MS);
    }

    pub fn update(&mut self, interval_ms: f32) {
        self.progress += interval_ms.max(0.0);
        if self.progress > self.duration + self.delay {
            self.restart();
        }
    }

    /// Current flash intensity in [0, 1]
    pub fn alpha(&self) -> f32 {
        flash_envelope(self.progress, self.duration)
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, alpha: f32) {
        let a = self.alpha() * alpha;
        if a > 0.0 {
            canvas.fill(self.color.with_alpha(a));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::RecordingCanvas;

    #[test]
    fn flashes_then_waits() {
        let mut thunder = Thunder::new(ParticleRng::new(1));
        thunder.update(75.0);
        assert!((thunder.alpha() - 1.0).abs() < 1e-4);
        thunder.update(225.0);
        assert_eq!(thunder.alpha(), 0.0);
        // Still inside the delay window
        thunder.update(1500.0);
        assert_eq!(thunder.alpha(), 0.0);
    }

    #[test]
    fn repeats_after_delay() {
        let mut thunder = Thunder::new(ParticleRng::new(2));
        let mut flashes = 0;
        let mut was_lit = false;
        for _ in 0..(30_000 / 10) {
            thunder.update(10.0);
            let lit = thunder.alpha() > 0.5;
            if lit && !was_lit {
                flashes += 1;
            }
            was_lit = lit;
        }
        // A 300 ms double flash every 2.3–7.3 s over 30 s
        assert!(flashes >= 4, "flashes = {flashes}");
    }

    #[test]
    fn dark_thunder_draws_nothing() {
        let thunder = Thunder::new(ParticleRng::new(3));
        let mut canvas = RecordingCanvas::new(10, 10);
        thunder.draw(&mut canvas, 1.0);
        assert!(canvas.ops.is_empty());
    }
}
