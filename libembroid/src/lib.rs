//! Turtle-driven embroidery pattern compiler.
//!
//! A tiny indentation-based script dialect (or a structured command list)
//! drives a pen-carrying cursor; the recorded points are shifted into the
//! non-negative quadrant and delta-encoded into a stitch plan for an
//! external encoder.
//!
//! ```
//! use libembroid::{parse_script, Turtle};
//!
//! let commands = parse_script("for i in range(4):\n  forward(40)\n  left(90)")?;
//! let mut turtle = Turtle::new(2.0)?;
//! turtle.execute(&commands);
//!
//! let pattern = turtle.finish("#00aa55");
//! # Ok::<(), libembroid::Error>(())
//! ```

mod command;
mod error;
mod pattern;
mod preview;
mod script;
mod turtle;

pub use command::{Command, Op};
pub use error::Error;
pub use pattern::{build_pattern, StitchCommand, StitchPattern};
pub use preview::render_svg;
pub use script::parse_script;
pub use turtle::{Point, Turtle, DEFAULT_COLOR, DEFAULT_STEP};
