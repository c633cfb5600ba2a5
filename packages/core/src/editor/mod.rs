//! Editor surface logic
//!
//! - [`controller`] - title/body state, slash trigger and fragment insertion
//! - [`caret`] - caret-to-screen coordinates behind the `CaretMetrics` seam
//! - [`format`] - toolbar markdown templates

pub mod caret;
pub mod controller;
pub mod format;


pub use caret::{caret_position, CaretMetrics, MonospaceMetrics, SurfaceBounds};
pub use controller::{EditorController, EditorSnapshot, TRIGGER_CHAR};
pub use format::{fill_template, MarkdownFormat};
