//! Minimal SVG preview of a stitch plan.
//!
//! Stands in for the external embroidery renderer: stitched segments are
//! drawn in the thread color, jumps only move the cursor. Coordinates come
//! out of the builder already normalized to the non-negative quadrant, so
//! the view box only needs a margin around the drawn extents.

use crate::pattern::{format_number, StitchCommand, StitchPattern};

const MARGIN: f64 = 5.0;
const STROKE_WIDTH: f64 = 0.6;

/// Renders the stitched segments of `pattern` as an SVG path.
pub fn render_svg(pattern: &StitchPattern) -> String {
	let mut path = String::new();
	let (mut x, mut y) = (0.0_f64, 0.0_f64);
	let (mut max_x, mut max_y) = (0.0_f64, 0.0_f64);
	let mut drawing = false;

	for command in &pattern.commands {
		match command {
			StitchCommand::AbsoluteJump { x: nx, y: ny } => {
				x = *nx;
				y = *ny;
				drawing = false;
			},
			StitchCommand::Jump { dx, dy } => {
				x += dx;
				y += dy;
				drawing = false;
			},
			StitchCommand::Stitch { dx, dy } => {
				if !drawing {
					path.push_str(&format!("M {} {} ", format_number(x), format_number(y)));
					drawing = true;
				}

				x += dx;
				y += dy;
				path.push_str(&format!("L {} {} ", format_number(x), format_number(y)));
			},
			StitchCommand::End => break,
		}

		max_x = max_x.max(x);
		max_y = max_y.max(y);
	}

	format!(
		concat!(
			"<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n",
			"  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\"/>\n",
			"</svg>\n"
		),
		format_number(-MARGIN),
		format_number(-MARGIN),
		format_number(max_x + 2.0 * MARGIN),
		format_number(max_y + 2.0 * MARGIN),
		path.trim_end(),
		pattern.color,
		STROKE_WIDTH,
	)
}
