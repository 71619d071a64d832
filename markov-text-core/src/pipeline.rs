//! Batch run over one corpus: train a word model and a char model,
//! generate one sequence with each and answer probability queries.

use std::fmt;
use std::str::FromStr;

use log::info;
use rand::Rng;

use crate::error::{MarkovError, Result};
use crate::model::text_model::{StartSeed, TextModel};
use crate::text::Granularity;

/// Order and generation length of one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
	pub order: usize,
	pub length: usize,
}

/// A "what is the probability of `token` after `context`" question.
///
/// Parses from `CONTEXT=TOKEN`, split on the last `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
	pub context: String,
	pub token: String,
}

impl Query {
	pub fn new(context: &str, token: &str) -> Self {
		Self { context: context.to_owned(), token: token.to_owned() }
	}
}

impl FromStr for Query {
	type Err = MarkovError;

	fn from_str(s: &str) -> Result<Self> {
		match s.rsplit_once('=') {
			Some((context, token)) if !context.is_empty() && !token.is_empty() => {
				Ok(Query::new(context, token))
			}
			_ => Err(MarkovError::InvalidArgument(format!(
				"query must look like CONTEXT=TOKEN, got '{s}'"
			))),
		}
	}
}

/// Parameters of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
	pub word: ChainConfig,
	pub char: ChainConfig,
	pub word_queries: Vec<Query>,
	pub char_queries: Vec<Query>,
}

impl Default for RunConfig {
	fn default() -> Self {
		Self {
			word: ChainConfig { order: 3, length: 50 },
			char: ChainConfig { order: 4, length: 200 },
			word_queries: vec![Query::new("alice was beginning", "to")],
			char_queries: vec![Query::new("alic", "e")],
		}
	}
}

/// Answer to one `Query`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityLine {
	pub context: Vec<String>,
	pub token: String,
	pub probability: f64,
}

impl fmt::Display for ProbabilityLine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let quoted: Vec<String> = self.context.iter().map(|t| format!("'{t}'")).collect();
		let context = if quoted.len() == 1 {
			format!("({},)", quoted[0])
		} else {
			format!("({})", quoted.join(", "))
		};
		write!(
			f,
			"Probability of '{}' following {}: {:?}",
			self.token, context, self.probability
		)
	}
}

/// Result of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
	pub word_sequence: String,
	pub char_sequence: String,
	pub probabilities: Vec<ProbabilityLine>,
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Generated Word Sequence:\n{}", self.word_sequence)?;
		write!(f, "\n\nGenerated Character Sequence:\n{}", self.char_sequence)?;
		for line in &self.probabilities {
			write!(f, "\n\n{line}")?;
		}
		Ok(())
	}
}

fn answer(model: &TextModel, queries: &[Query]) -> Vec<ProbabilityLine> {
	queries
		.iter()
		.map(|query| ProbabilityLine {
			context: model.context_tokens(&query.context),
			token: query.token.clone(),
			probability: model.probability(&query.context, &query.token),
		})
		.collect()
}

/// Trains both models on `text` and builds the report.
///
/// Each model generates from the opening context of the corpus.
///
/// # Errors
/// - `InvalidConfiguration` if an order is 0.
/// - `InvalidArgument` if the corpus has fewer tokens than a model's order.
pub fn run<R: Rng>(text: &str, config: &RunConfig, rng: &mut R) -> Result<Report> {
	let mut word_model = TextModel::new(Granularity::Word, config.word.order)?;
	let mut char_model = TextModel::new(Granularity::Char, config.char.order)?;

	let word_count = word_model.train_text(text);
	let char_count = char_model.train_text(text);
	info!(
		"Trained on {word_count} words ({} contexts) and {char_count} characters ({} contexts)",
		word_model.chain().len(),
		char_model.chain().len()
	);

	let word_sequence = word_model.generate(&StartSeed::Corpus, config.word.length, rng)?;
	let char_sequence = char_model.generate(&StartSeed::Corpus, config.char.length, rng)?;

	let mut probabilities = answer(&word_model, &config.word_queries);
	probabilities.extend(answer(&char_model, &config.char_queries));

	Ok(Report { word_sequence, char_sequence, probabilities })
}
