//! Nimbus Core - Foundational types for the Nimbus weather engine
//!
//! This crate provides the core types that all other Nimbus crates depend on:
//! - `WeatherKind` - The weather animations the engine can show
//! - `CanvasGeometry` - Real canvas size plus the oversized diagonal space
//! - `Canvas` - The 2D drawing surface abstraction models paint onto
//! - `Color` - RGBA colors
//! - Error types and Result alias

mod canvas;
mod error;
mod kind;
mod types;

pub use canvas::{Canvas, DrawOp, RecordingCanvas};
pub use error::{NimbusError, Result};
pub use kind::WeatherKind;
pub use types::{CanvasGeometry, Color, Rect};
