//! The drawing surface supplied by the host

use nimbus_core::Canvas;

/// A host-owned surface the draw loop paints onto.
///
/// Each draw tick locks a canvas, paints one frame and posts it. A surface
/// that cannot currently hand out a canvas returns `None` and the tick is
/// skipped.
pub trait Surface: Send {
    fn lock_canvas(&mut self) -> Option<&mut dyn Canvas>;

    /// Release the canvas obtained from [`lock_canvas`](Surface::lock_canvas)
    /// and present it
    fn unlock_and_post(&mut self);
}
