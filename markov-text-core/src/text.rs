//! Text cleaning and tokenization.
//!
//! Turns raw corpus text into the token sequences fed to a
//! [`MarkovChain`](crate::model::markov_chain::MarkovChain), and renders
//! generated sequences back into text.

use serde::{Deserialize, Serialize};

/// Tokenization level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
	/// One token per whitespace-separated word.
	#[default]
	Word,
	/// One token per character, spaces included.
	Char,
}

impl Granularity {
	pub fn name(&self) -> &'static str {
		match self {
			Granularity::Word => "word",
			Granularity::Char => "char",
		}
	}
}

/// Normalizes raw text before tokenization.
///
/// - Lowercases everything
/// - Removes ASCII punctuation
/// - Replaces `\n` with a space
pub fn clean_text(text: &str) -> String {
	text.chars()
		.filter(|c| !c.is_ascii_punctuation())
		.flat_map(char::to_lowercase)
		.map(|c| if c == '\n' { ' ' } else { c })
		.collect()
}

/// Splits normalized text into tokens.
///
/// Word level splits on whitespace runs, so no empty token is produced.
/// Char level yields every character, whitespace included.
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<String> {
	match granularity {
		Granularity::Word => text.split_whitespace().map(str::to_owned).collect(),
		Granularity::Char => text.chars().map(String::from).collect(),
	}
}

/// Joins tokens back into text: words with a space, characters as-is.
pub fn render<S: AsRef<str>>(tokens: &[S], granularity: Granularity) -> String {
	let separator = match granularity {
		Granularity::Word => " ",
		Granularity::Char => "",
	};
	tokens
		.iter()
		.map(AsRef::as_ref)
		.collect::<Vec<&str>>()
		.join(separator)
}
