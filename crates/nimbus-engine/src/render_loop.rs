//! The update and draw threads
//!
//! Two loops run at their own cadence over [`Shared`] state:
//! - update: ease rotation, move particles, advance the transition, publish
//!   an immutable [`Frame`]
//! - draw: lock the surface canvas, paint the latest frame, post it
//!
//! Both sleep on a condvar for the remainder of their interval so a stop
//! request wakes them at once.

use crate::config::EngineConfig;
use crate::simulation::{Frame, Simulation};
use crate::surface::Surface;
use nimbus_core::Result;
use nimbus_runtime::{OrientationFilter, TickClock};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Lock a mutex, recovering the data if another thread panicked holding it
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State touched by both loops and by the engine facade
pub(crate) struct Shared {
    pub sim: Mutex<Simulation>,
    pub frame: Mutex<Arc<Frame>>,
    pub orientation: Mutex<OrientationFilter>,
    pub surface: Mutex<Option<Box<dyn Surface>>>,
    /// `f32` bits of the scroll ratio
    scroll_bits: AtomicU32,
    /// Last canvas size seen by the draw loop, `width << 32 | height`; 0 when unknown
    canvas_dims: AtomicU64,
    posted: AtomicU64,
}

impl Shared {
    pub fn new(sim: Simulation, orientation: OrientationFilter) -> Self {
        let frame = Arc::new(sim.frame());
        Self {
            sim: Mutex::new(sim),
            frame: Mutex::new(frame),
            orientation: Mutex::new(orientation),
            surface: Mutex::new(None),
            scroll_bits: AtomicU32::new(0.0f32.to_bits()),
            canvas_dims: AtomicU64::new(0),
            posted: AtomicU64::new(0),
        }
    }

    pub fn scroll_ratio(&self) -> f32 {
        f32::from_bits(self.scroll_bits.load(Ordering::Relaxed))
    }

    pub fn set_scroll_ratio(&self, ratio: f32) {
        self.scroll_bits.store(ratio.to_bits(), Ordering::Relaxed);
    }

    pub fn canvas_dims(&self) -> Option<(u32, u32)> {
        match self.canvas_dims.load(Ordering::Acquire) {
            0 => None,
            packed => Some(((packed >> 32) as u32, packed as u32)),
        }
    }

    pub fn set_canvas_dims(&self, width: u32, height: u32) {
        let packed = (u64::from(width) << 32) | u64::from(height);
        self.canvas_dims.store(packed, Ordering::Release);
    }

    pub fn posted_frames(&self) -> u64 {
        self.posted.load(Ordering::Relaxed)
    }

    pub fn latest_frame(&self) -> Arc<Frame> {
        Arc::clone(&lock(&self.frame))
    }

    /// Replace the published frame with a snapshot of the simulation
    pub fn publish(&self) {
        let frame = Arc::new(lock(&self.sim).frame());
        *lock(&self.frame) = frame;
    }

    /// One update-loop tick covering `interval_ms` of real time
    pub fn update_tick(&self, interval_ms: f64) {
        let targets = lock(&self.orientation).current_angles();
        let dims = self.canvas_dims();
        let frame = {
            let mut sim = lock(&self.sim);
            if let Some((width, height)) = dims {
                sim.resize(width, height);
            }
            sim.tick(interval_ms, targets);
            Arc::new(sim.frame())
        };
        *lock(&self.frame) = frame;
    }

    /// One draw-loop tick. Returns false when no canvas was available.
    pub fn draw_tick(&self) -> bool {
        let frame = self.latest_frame();
        let scroll_ratio = self.scroll_ratio();

        let mut guard = lock(&self.surface);
        let Some(surface) = guard.as_mut() else {
            return false;
        };
        let Some(canvas) = surface.lock_canvas() else {
            return false;
        };
        let (width, height) = canvas.size();
        self.set_canvas_dims(width, height);
        canvas.clear();
        frame.draw(canvas, scroll_ratio);
        surface.unlock_and_post();
        self.posted.fetch_add(1, Ordering::Relaxed);
        true
    }
}

/// Stop flag both loops observe before every tick
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: Mutex<bool>,
    condvar: Condvar,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        *lock(&self.stopped) = true;
        self.condvar.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        *lock(&self.stopped)
    }

    /// Sleep for up to `timeout`. Returns true as soon as a stop is signalled.
    pub fn wait(&self, timeout: Duration) -> bool {
        let guard = lock(&self.stopped);
        let (guard, _) = self
            .condvar
            .wait_timeout_while(guard, timeout, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Handles to the running update and draw threads
pub(crate) struct RenderLoop {
    stop: Arc<StopSignal>,
    threads: Vec<JoinHandle<()>>,
}

impl RenderLoop {
    /// Spawn both loops. If either thread cannot be spawned, whatever did
    /// start is stopped again and the error is returned.
    pub fn start(shared: Arc<Shared>, config: &EngineConfig) -> Result<Self> {
        let mut render_loop = Self {
            stop: Arc::new(StopSignal::new()),
            threads: Vec::with_capacity(2),
        };

        let update = {
            let shared = Arc::clone(&shared);
            let stop = Arc::clone(&render_loop.stop);
            let interval = config.data_update_interval();
            thread::Builder::new()
                .name("nimbus-update".into())
                .spawn(move || update_loop(&shared, &stop, interval))?
        };
        render_loop.threads.push(update);

        let draw = {
            let stop = Arc::clone(&render_loop.stop);
            let interval = config.draw_interval();
            thread::Builder::new()
                .name("nimbus-draw".into())
                .spawn(move || draw_loop(&shared, &stop, interval))
        };
        match draw {
            Ok(handle) => render_loop.threads.push(handle),
            Err(err) => {
                render_loop.shutdown();
                return Err(err.into());
            }
        }

        log::debug!("render loop started");
        Ok(render_loop)
    }

    /// Signal both loops and wait for them to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.stop();
        for handle in self.threads.drain(..) {
            if handle.join().is_err() {
                log::error!("render thread panicked");
            }
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn update_loop(shared: &Shared, stop: &StopSignal, interval: Duration) {
    let mut clock = TickClock::new(interval);
    while !stop.is_stopped() {
        let elapsed = clock.tick();
        shared.update_tick(elapsed);
        if stop.wait(clock.remaining()) {
            break;
        }
    }
    log::debug!("update loop exited after {:.0} ms", clock.total_ms);
}

fn draw_loop(shared: &Shared, stop: &StopSignal, interval: Duration) {
    let mut clock = TickClock::new(interval);
    let mut skipped = 0u64;
    while !stop.is_stopped() {
        clock.tick();
        if !shared.draw_tick() {
            skipped += 1;
        }
        if stop.wait(clock.remaining()) {
            break;
        }
    }
    log::debug!("draw loop exited ({skipped} ticks without a canvas)");
}
