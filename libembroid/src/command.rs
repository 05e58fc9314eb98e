use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The closed vocabulary of turtle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
	Forward,
	Back,
	Left,
	Right,
	PenUp,
	PenDown,
	Goto,
	SetHeading,
	DrawSquare,
	DrawSpiro,
}

impl Op {
	/// Looks up an operation by its (case-insensitive) script name.
	pub fn from_name(name: &str) -> Result<Op, Error> {
		let op = match name.to_ascii_lowercase().as_str() {
			"forward" => Op::Forward,
			"back" => Op::Back,
			"left" => Op::Left,
			"right" => Op::Right,
			"penup" => Op::PenUp,
			"pendown" => Op::PenDown,
			"goto" => Op::Goto,
			"setheading" => Op::SetHeading,
			"draw_square" => Op::DrawSquare,
			"draw_spiro" => Op::DrawSpiro,
			_ => return Err(Error::UnknownOperation(name.to_string())),
		};

		Ok(op)
	}

	pub fn name(&self) -> &'static str {
		match self {
			Op::Forward => "forward",
			Op::Back => "back",
			Op::Left => "left",
			Op::Right => "right",
			Op::PenUp => "penup",
			Op::PenDown => "pendown",
			Op::Goto => "goto",
			Op::SetHeading => "setheading",
			Op::DrawSquare => "draw_square",
			Op::DrawSpiro => "draw_spiro",
		}
	}

	/// Allowed argument counts, inclusive. Only `draw_spiro` has optional
	/// trailing arguments.
	fn arity(&self) -> (usize, usize) {
		match self {
			Op::Forward | Op::Back | Op::Left | Op::Right | Op::SetHeading | Op::DrawSquare => (1, 1),
			Op::PenUp | Op::PenDown => (0, 0),
			Op::Goto => (2, 2),
			Op::DrawSpiro => (3, 5),
		}
	}
}

/// A single validated turtle instruction: operation plus numeric arguments.
///
/// Arity is checked at construction, so an existing `Command` always carries
/// an argument count its operation accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCommand", into = "RawCommand")]
pub struct Command {
	op: Op,
	args: Vec<f64>,
}

impl Command {
	pub fn new(op: Op, args: Vec<f64>) -> Result<Command, Error> {
		let (min, max) = op.arity();

		if args.len() < min || args.len() > max {
			return Err(Error::Arity {
				op: op.name(),
				expected: if min == max {
					min.to_string()
				} else {
					format!("{} to {}", min, max)
				},
				actual: args.len(),
			});
		}

		Ok(Command { op, args })
	}

	pub fn from_name(name: &str, args: Vec<f64>) -> Result<Command, Error> {
		Command::new(Op::from_name(name)?, args)
	}

	pub fn op(&self) -> Op {
		self.op
	}

	pub fn args(&self) -> &[f64] {
		&self.args
	}

	/// Argument at `index`, or `default` when a trailing optional argument
	/// was omitted.
	pub(crate) fn arg_or(&self, index: usize, default: f64) -> f64 {
		self.args.get(index).copied().unwrap_or(default)
	}
}

/// Wire form of a command, as it appears in structured JSON input.
#[derive(Serialize, Deserialize)]
struct RawCommand {
	op: String,
	#[serde(default)]
	args: Vec<f64>,
}

impl TryFrom<RawCommand> for Command {
	type Error = Error;

	fn try_from(raw: RawCommand) -> Result<Command, Error> {
		Command::from_name(&raw.op, raw.args)
	}
}

impl From<Command> for RawCommand {
	fn from(command: Command) -> RawCommand {
		RawCommand {
			op: command.op.name().to_string(),
			args: command.args,
		}
	}
}
