//! Nimbus Engine - Runs a weather animation against a host surface
//!
//! This crate ties the particle models to time and the screen:
//! - `EngineConfig` - Loop cadence, cross-fade length and startup options
//! - `TransitionController` - Dismiss / display cross-fade between kinds
//! - `Simulation` and `Frame` - Update-tick state and its published snapshots
//! - `Surface` - The host drawing surface
//! - `WeatherEngine` - Facade owning the update and draw threads

mod config;
mod engine;
mod render_loop;
mod simulation;
mod surface;
mod transition;

pub use config::EngineConfig;
pub use engine::WeatherEngine;
pub use render_loop::StopSignal;
pub use simulation::{Frame, SavedState, Simulation};
pub use surface::Surface;
pub use transition::{TransitionController, TransitionPhase, TransitionState};
