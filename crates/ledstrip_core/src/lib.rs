//! ledstrip_core: transport-free logic for the mock LED strip.
//!
//! Design goals:
//! - Pure, testable logic (no bus deps, no async, no locking).
//! - Explicit types; no macro wizardry.
//! - Small, stable public API surface.
//!
//! The service layer owns the mutex, the timers and the outbound channel;
//! everything in this crate is a plain function of its inputs.

pub mod colour;
pub mod error;
pub mod render;
pub mod state;

pub use colour::{Colour, ALL_COLOURS};
pub use error::{Result, StripError};
pub use render::render;
pub use state::{Applied, DisplayCore, Token};
