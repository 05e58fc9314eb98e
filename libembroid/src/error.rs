use thiserror::Error;

/// Errors reported while turning a script or command list into a pattern.
///
/// All of these are caller input errors, detected before or during command
/// construction. Execution of validated commands never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
	/// Malformed script text: bad syntax, bad indentation, or an
	/// unparseable numeric token.
	#[error("line {line}: {message}: `{text}`")]
	Parse { line: usize, message: String, text: String },

	/// Wrong number of arguments for an operation.
	#[error("{op} expects {expected} argument(s), got {actual}")]
	Arity {
		op: &'static str,
		expected: String,
		actual: usize,
	},

	/// Operation name outside the closed vocabulary.
	#[error("unknown operation `{0}`")]
	UnknownOperation(String),

	/// Non-positive maximum step length.
	#[error("step length must be positive, got {0}")]
	Configuration(f64),
}
