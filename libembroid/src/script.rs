//! Indentation-scoped parser for the turtle script dialect.
//!
//! Each significant line is either a call like `forward(10)` or a repeat
//! header like `for i in range(4):`. A header's body is the run of lines
//! indented exactly two spaces deeper; bodies nest to arbitrary depth and
//! are unrolled into a flat command sequence.

use pest::Parser;
use pest_derive::Parser;
use tracing::{debug, trace};

use crate::{command::Command, error::Error};

/// Spaces each leading tab expands to, and the extra indent a repeat body
/// must add over its header.
const INDENT_WIDTH: usize = 2;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct LineParser;

/// One significant script line after lexical preprocessing.
struct Line<'a> {
	number: usize,
	indent: usize,
	text: &'a str,
}

enum Statement {
	Call(Command),
	Repeat(u64),
}

/// Parses script text into a flat command sequence.
///
/// Fails with a single [`Error`] on the first malformed line; no partial
/// sequence is ever returned.
pub fn parse_script(source: &str) -> Result<Vec<Command>, Error> {
	let lines = preprocess(source);
	let mut pos = 0;
	let commands = parse_block(&lines, &mut pos, 0)?;

	debug!(lines = lines.len(), commands = commands.len(), "parsed script");

	Ok(commands)
}

/// Splits the source into significant lines, expanding leading tabs and
/// dropping blank and `#` comment lines.
fn preprocess(source: &str) -> Vec<Line<'_>> {
	let mut lines = Vec::new();

	for (index, raw) in source.lines().enumerate() {
		// Only a leading run of tabs is normalized; tabs and spaces are
		// otherwise not mixed.
		let tabs = raw.chars().take_while(|&c| c == '\t').count();
		let rest = &raw[tabs..];
		let spaces = rest.chars().take_while(|&c| c == ' ').count();
		let text = rest[spaces..].trim_end();

		if text.is_empty() || text.starts_with('#') {
			continue;
		}

		lines.push(Line {
			number: index + 1,
			indent: tabs * INDENT_WIDTH + spaces,
			text,
		});
	}

	lines
}

/// Parses the run of lines at exactly `indent`, recursing for repeat
/// bodies. A shallower line ends the block and is left for the parent;
/// a deeper one is an error.
fn parse_block(lines: &[Line], pos: &mut usize, indent: usize) -> Result<Vec<Command>, Error> {
	let mut commands = Vec::new();

	while *pos < lines.len() {
		let line = &lines[*pos];

		if line.indent < indent {
			break;
		}

		if line.indent > indent {
			return Err(parse_error(line, "unexpected indentation"));
		}

		match parse_statement(line)? {
			Statement::Call(command) => {
				commands.push(command);
				*pos += 1;
			},
			Statement::Repeat(count) => {
				*pos += 1;
				let body = parse_block(lines, pos, indent + INDENT_WIDTH)?;

				if body.is_empty() {
					return Err(parse_error(line, "expected an indented block after the repeat header"));
				}

				for _ in 0..count {
					commands.extend_from_slice(&body);
				}
			},
		}
	}

	Ok(commands)
}

fn parse_statement(line: &Line) -> Result<Statement, Error> {
	trace!(line = line.number, text = line.text, "parsing statement");

	let mut pairs = LineParser::parse(Rule::line, line.text)
		.map_err(|_| parse_error(line, "expected `name(args)` or `for _ in range(n):`"))?;

	let statement = pairs
		.next()
		.and_then(|pair| pair.into_inner().next())
		.ok_or_else(|| parse_error(line, "empty statement"))?;

	match statement.as_rule() {
		Rule::repeat_header => {
			let count = statement
				.into_inner()
				.find(|pair| pair.as_rule() == Rule::integer)
				.ok_or_else(|| parse_error(line, "missing repeat count"))?;
			let count = count
				.as_str()
				.parse::<u64>()
				.map_err(|_| parse_error(line, "repeat count out of range"))?;

			Ok(Statement::Repeat(count))
		},
		Rule::call => {
			let mut inner = statement.into_inner();
			let name = inner
				.next()
				.ok_or_else(|| parse_error(line, "missing operation name"))?;
			let mut args = Vec::new();

			if let Some(list) = inner.next() {
				for token in list.into_inner() {
					let value = token
						.as_str()
						.parse::<f64>()
						.map_err(|_| parse_error(line, "invalid numeric argument"))?;
					args.push(value);
				}
			}

			let command = Command::from_name(name.as_str(), args)?;

			Ok(Statement::Call(command))
		},
		_ => Err(parse_error(line, "expected `name(args)` or `for _ in range(n):`")),
	}
}

fn parse_error(line: &Line, message: &str) -> Error {
	Error::Parse {
		line: line.number,
		message: message.to_string(),
		text: line.text.to_string(),
	}
}
