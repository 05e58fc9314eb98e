//! Normalization and delta encoding of recorded points into a stitch plan.

use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use crate::turtle::Point;

/// One entry in the encoded stitch plan. `Jump` and `Stitch` deltas are
/// relative to the previously visited position; `AbsoluteJump` re-establishes
/// the cursor and `End` terminates the stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum StitchCommand {
	AbsoluteJump { x: f64, y: f64 },
	Jump { dx: f64, dy: f64 },
	Stitch { dx: f64, dy: f64 },
	End,
}

/// The finished, encoder-ready plan: one thread color plus the ordered
/// command stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StitchPattern {
	pub color: String,
	pub commands: Vec<StitchCommand>,
}

/// Shifts `points` into the non-negative quadrant and delta-encodes them.
///
/// The shift guarantees the normalized sequence has minimum x and y both
/// exactly 0, which downstream encoders rely on. The stream always ends with
/// [`StitchCommand::End`]; an empty point sequence encodes to exactly
/// `[End]`. Otherwise it opens with `AbsoluteJump(0, 0)` and carries one
/// relative command per input point, `Stitch` where the pen was down and
/// `Jump` where it was up.
pub fn build_pattern(points: Vec<Point>, color: &str) -> StitchPattern {
	let mut commands = Vec::with_capacity(points.len() + 2);

	if points.is_empty() {
		commands.push(StitchCommand::End);

		return StitchPattern {
			color: color.to_string(),
			commands,
		};
	}

	let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
	let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);

	commands.push(StitchCommand::AbsoluteJump { x: 0.0, y: 0.0 });

	let (mut prev_x, mut prev_y) = (0.0, 0.0);

	for point in &points {
		let x = point.x - min_x;
		let y = point.y - min_y;
		let (dx, dy) = (x - prev_x, y - prev_y);

		commands.push(if point.pen_down {
			StitchCommand::Stitch { dx, dy }
		} else {
			StitchCommand::Jump { dx, dy }
		});

		prev_x = x;
		prev_y = y;
	}

	commands.push(StitchCommand::End);

	debug!(points = points.len(), commands = commands.len(), "built stitch pattern");

	StitchPattern {
		color: color.to_string(),
		commands,
	}
}

impl StitchPattern {
	/// Writes the plan as a plain-text listing, one command per line, for a
	/// downstream encoder.
	pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
		writeln!(writer, "COLOR {}", self.color)?;

		for command in &self.commands {
			match command {
				StitchCommand::AbsoluteJump { x, y } => {
					writeln!(writer, "ABSJUMP {} {}", format_number(*x), format_number(*y))?;
				},
				StitchCommand::Jump { dx, dy } => {
					writeln!(writer, "JUMP {} {}", format_number(*dx), format_number(*dy))?;
				},
				StitchCommand::Stitch { dx, dy } => {
					writeln!(writer, "STITCH {} {}", format_number(*dx), format_number(*dy))?;
				},
				StitchCommand::End => writeln!(writer, "END")?,
			}
		}

		Ok(())
	}
}

pub(crate) fn format_number(value: f64) -> String {
	let mut s = format!("{:.3}", value);
	let t = s.trim_end_matches('0').trim_end_matches('.').len();
	s.truncate(t);
	s
}

#[cfg(test)]
mod tests {
	use super::*;

	fn point(x: f64, y: f64, pen_down: bool) -> Point {
		Point { x, y, pen_down }
	}

	/// Replays the relative commands from (0, 0), returning the visited
	/// absolute positions.
	fn replay(commands: &[StitchCommand]) -> Vec<(f64, f64)> {
		let (mut x, mut y) = (0.0, 0.0);
		let mut visited = Vec::new();

		for command in commands {
			match command {
				StitchCommand::AbsoluteJump { x: nx, y: ny } => {
					x = *nx;
					y = *ny;
				},
				StitchCommand::Jump { dx, dy } | StitchCommand::Stitch { dx, dy } => {
					x += dx;
					y += dy;
					visited.push((x, y));
				},
				StitchCommand::End => break,
			}
		}

		visited
	}

	#[test]
	fn empty_points_encode_to_end_only() {
		let pattern = build_pattern(Vec::new(), "#00ff00");

		assert_eq!(pattern.commands, vec![StitchCommand::End]);
	}

	#[test]
	fn stream_opens_with_absolute_jump_and_closes_with_end() {
		let pattern = build_pattern(vec![point(3.0, 4.0, true)], "#00ff00");

		assert_eq!(pattern.commands.first(), Some(&StitchCommand::AbsoluteJump { x: 0.0, y: 0.0 }));
		assert_eq!(pattern.commands.last(), Some(&StitchCommand::End));
	}

	#[test]
	fn one_relative_command_per_point() {
		let points = vec![
			point(1.0, 1.0, true),
			point(2.0, 1.0, false),
			point(2.0, 3.0, true),
		];
		let pattern = build_pattern(points, "#00ff00");

		assert_eq!(pattern.commands.len(), 3 + 2);
	}

	#[test]
	fn pen_state_selects_stitch_or_jump() {
		let points = vec![point(5.0, 5.0, false), point(6.0, 5.0, true)];
		let pattern = build_pattern(points, "#00ff00");

		assert!(matches!(pattern.commands[1], StitchCommand::Jump { .. }));
		assert!(matches!(pattern.commands[2], StitchCommand::Stitch { .. }));
	}

	#[test]
	fn normalization_shifts_minima_to_zero() {
		let points = vec![
			point(-10.0, 4.0, true),
			point(-2.0, -3.0, true),
			point(5.0, 12.0, true),
		];
		let pattern = build_pattern(points, "#00ff00");
		let visited = replay(&pattern.commands);

		let min_x = visited.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
		let min_y = visited.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);

		assert_eq!(min_x, 0.0);
		assert_eq!(min_y, 0.0);
		assert_eq!(visited[0], (0.0, 7.0));
		assert_eq!(visited[2], (15.0, 15.0));
	}

	#[test]
	fn replaying_deltas_reconstructs_the_shifted_points() {
		let points = vec![
			point(0.25, -1.5, true),
			point(3.75, 2.25, false),
			point(-0.5, 0.0, true),
		];
		let (min_x, min_y) = (-0.5, -1.5);
		let pattern = build_pattern(points.clone(), "#00ff00");
		let visited = replay(&pattern.commands);

		assert_eq!(visited.len(), points.len());

		for (got, want) in visited.iter().zip(&points) {
			assert!((got.0 - (want.x - min_x)).abs() < 1e-9);
			assert!((got.1 - (want.y - min_y)).abs() < 1e-9);
		}
	}

	#[test]
	fn color_is_carried_through() {
		let pattern = build_pattern(vec![point(0.0, 0.0, true)], "#00aa55");

		assert_eq!(pattern.color, "#00aa55");
	}

	#[test]
	fn listing_is_one_command_per_line() {
		let points = vec![point(0.0, 0.0, false), point(2.0, 1.5, true)];
		let pattern = build_pattern(points, "#00aa55");

		let mut buffer = Vec::new();
		pattern.write(&mut buffer).unwrap();

		let listing = String::from_utf8(buffer).unwrap();
		assert_eq!(listing, "COLOR #00aa55\nABSJUMP 0 0\nJUMP 0 0\nSTITCH 2 1.5\nEND\n");
	}
}
