use thiserror::Error;

/// Errors raised by the Markov text library.
///
/// Generation running off the edge of the trained model is not an error:
/// it shows up as a shorter output.
#[derive(Error, Debug)]
pub enum MarkovError {
	/// A model was configured with unusable parameters (e.g. order 0).
	#[error("Invalid configuration: {0}")]
	InvalidConfiguration(String),

	/// An operation received an argument that does not fit the model.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
