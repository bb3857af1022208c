//! Heatrail Detection
//!
//! Locates a moving point-like object (a cursor) by differencing
//! consecutive frames:
//! - [`FrameDifferenceDetector`]: one frame pair in, at most one candidate
//!   position out, filtered by size and shape heuristics
//! - [`DetectionPass`]: drives the detector over a whole video to build a
//!   [`heatrail_trail_model::CursorTrail`], with progress reporting and
//!   cooperative cancellation
//!
//! Detection is pure computation over in-memory frames; the pass is the
//! only long-running operation and is designed to run off the interactive
//! path.

pub mod detector;
pub mod pass;

pub use detector::FrameDifferenceDetector;
pub use pass::{DetectionPass, PassOutcome};
