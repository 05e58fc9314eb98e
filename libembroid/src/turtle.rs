//! The pen-carrying cursor that turns commands into sampled points.

use nalgebra::{Point2, Rotation2, Vector2};
use serde::Serialize;
use tracing::debug;

use crate::{
	command::{Command, Op},
	error::Error,
	pattern::{build_pattern, StitchPattern},
};

/// Default maximum stitch length.
pub const DEFAULT_STEP: f64 = 2.0;

/// Default thread color.
pub const DEFAULT_COLOR: &str = "#00ff00";

/// A recorded cursor position together with the pen state it was visited
/// under. Append-only: once recorded, a point never changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
	pub pen_down: bool,
}

/// Turtle cursor: position, heading and pen state, plus the points recorded
/// so far. One instance per execution; the heading accumulates without
/// modulo-360 normalization.
pub struct Turtle {
	step: f64,
	position: Point2<f64>,
	heading: f64,
	pen_down: bool,
	points: Vec<Point>,
}

impl Turtle {
	/// Creates a cursor at the origin, heading 0, pen down.
	///
	/// `step` is the maximum length of one stitched sub-segment and must be
	/// positive and finite.
	pub fn new(step: f64) -> Result<Turtle, Error> {
		if !(step > 0.0) || !step.is_finite() {
			return Err(Error::Configuration(step));
		}

		Ok(Turtle {
			step,
			position: Point2::origin(),
			heading: 0.0,
			pen_down: true,
			points: Vec::new(),
		})
	}

	/// Runs every command in order. Total over validated commands: nothing
	/// here fails.
	pub fn execute(&mut self, commands: &[Command]) {
		for command in commands {
			self.apply(command);
		}

		debug!(
			commands = commands.len(),
			points = self.points.len(),
			"executed command sequence"
		);
	}

	fn apply(&mut self, command: &Command) {
		let args = command.args();

		match command.op() {
			Op::Forward => self.forward(args[0]),
			Op::Back => self.forward(-args[0]),
			Op::Left => self.heading += args[0],
			Op::Right => self.heading -= args[0],
			Op::PenUp => self.pen_down = false,
			Op::PenDown => self.pen_down = true,
			Op::Goto => self.goto(Point2::new(args[0], args[1])),
			Op::SetHeading => self.heading = args[0],
			Op::DrawSquare => self.draw_square(args[0]),
			Op::DrawSpiro => self.draw_spiro(
				args[0],
				args[1],
				args[2],
				command.arg_or(3, 6.0),
				command.arg_or(4, 3.0),
			),
		}
	}

	fn record(&mut self) {
		self.points.push(Point {
			x: self.position.x,
			y: self.position.y,
			pen_down: self.pen_down,
		});
	}

	fn step_by(&mut self, delta: Vector2<f64>) {
		self.position += delta;
		self.record();
	}

	/// Moves along the current heading, subdivided so no recorded
	/// sub-segment exceeds the step length.
	fn forward(&mut self, distance: f64) {
		if distance == 0.0 {
			return;
		}

		let steps = subdivisions(distance.abs(), self.step);
		let length = distance / steps as f64;
		let delta = Rotation2::new(self.heading.to_radians()) * (Vector2::x() * length);

		for _ in 0..steps {
			self.step_by(delta);
		}
	}

	/// Absolute move. Subdivided like `forward` while the pen is down; a
	/// single logical hop, regardless of distance, while it is up.
	fn goto(&mut self, target: Point2<f64>) {
		if target == self.position {
			return;
		}

		let delta = target - self.position;

		if self.pen_down {
			let steps = subdivisions(delta.norm(), self.step);
			let sub = delta / steps as f64;

			for _ in 0..steps {
				self.step_by(sub);
			}
		} else {
			self.position = target;
			self.record();
		}
	}

	fn draw_square(&mut self, size: f64) {
		for _ in 0..4 {
			self.forward(size);
			self.heading += 90.0;
		}
	}

	/// Samples the hypotrochoid `x(t) = (R-r)cos(t) + d cos(kt)`,
	/// `y(t) = (R-r)sin(t) - d sin(kt)` with `k = (R-r)/r` at integer
	/// degrees, jumping to the first sample pen-up and stitching the rest.
	fn draw_spiro(&mut self, outer: f64, inner: f64, pen_offset: f64, revolutions: f64, step_deg: f64) {
		self.pen_down = false;

		let k = (outer - inner) / inner;
		let end = (360.0 * revolutions) as i64;
		let step_deg = (step_deg as i64).max(1);
		let mut first = true;
		let mut angle = 0_i64;

		while angle <= end {
			let t = (angle as f64).to_radians();
			let x = (outer - inner) * t.cos() + pen_offset * (k * t).cos();
			let y = (outer - inner) * t.sin() - pen_offset * (k * t).sin();

			self.goto(Point2::new(x, y));

			if first {
				self.pen_down = true;
				first = false;
			}

			angle += step_deg;
		}

		self.pen_down = false;
	}

	pub fn points(&self) -> &[Point] {
		&self.points
	}

	pub fn position(&self) -> (f64, f64) {
		(self.position.x, self.position.y)
	}

	pub fn heading(&self) -> f64 {
		self.heading
	}

	pub fn is_pen_down(&self) -> bool {
		self.pen_down
	}

	/// Hands the recorded points off to the pattern builder.
	pub fn finish(self, color: &str) -> StitchPattern {
		build_pattern(self.points, color)
	}
}

/// Number of sub-segments for a move of `distance`: `max(1, ⌊distance/step⌋)`,
/// so even very short non-zero moves record one point.
fn subdivisions(distance: f64, step: f64) -> usize {
	let steps = (distance / step).floor();

	if steps >= 1.0 {
		steps as usize
	} else {
		1
	}
}
