use log::debug;
use rand::Rng;

use super::markov_chain::MarkovChain;
use crate::error::{MarkovError, Result};
use crate::text::{Granularity, clean_text, render, tokenize};

/// Strategy used to select the starting context when generating text.
///
/// # Variants
/// - `Corpus`: the first `order` tokens of the training corpus.
/// - `Random`: a context picked at random among the known ones.
/// - `Custom(String)`: user text, cleaned and tokenized like the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StartSeed {
	#[default]
	Corpus,
	Random,
	Custom(String),
}

/// A Markov chain bound to a tokenization level, fed with raw text.
///
/// This struct manages:
/// - `chain`: the token-level model.
/// - `granularity`: how raw text is split into tokens.
/// - `corpus_seed`: the opening context of the first corpus long enough
///   to provide one, used by `StartSeed::Corpus`.
#[derive(Debug, Clone)]
pub struct TextModel {
	granularity: Granularity,
	chain: MarkovChain<String>,
	corpus_seed: Option<Vec<String>>,
}

impl TextModel {
	/// Creates an empty model.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if `order < 1`.
	pub fn new(granularity: Granularity, order: usize) -> Result<Self> {
		Ok(Self {
			granularity,
			chain: MarkovChain::new(order)?,
			corpus_seed: None,
		})
	}

	pub fn granularity(&self) -> Granularity {
		self.granularity
	}

	pub fn order(&self) -> usize {
		self.chain.order()
	}

	pub fn chain(&self) -> &MarkovChain<String> {
		&self.chain
	}

	pub fn corpus_seed(&self) -> Option<&[String]> {
		self.corpus_seed.as_deref()
	}

	/// Cleans and tokenizes `text` the same way training text is.
	pub fn context_tokens(&self, text: &str) -> Vec<String> {
		tokenize(&clean_text(text), self.granularity)
	}

	/// Adds raw text to the model.
	///
	/// Returns the number of tokens extracted from `text`.
	pub fn train_text(&mut self, text: &str) -> usize {
		let tokens = self.context_tokens(text);
		if self.corpus_seed.is_none() && tokens.len() >= self.order() {
			self.corpus_seed = Some(tokens[..self.order()].to_vec());
		}
		self.chain.train(&tokens);
		debug!(
			"{} model trained on {} tokens",
			self.granularity.name(),
			tokens.len()
		);
		tokens.len()
	}

	/// Resolves a start strategy into a context of exactly `order` tokens.
	///
	/// # Errors
	/// - `InvalidArgument` if no corpus or random seed is available.
	/// - `InvalidArgument` if a custom seed does not tokenize into `order`
	///   tokens.
	pub fn resolve_seed<R: Rng>(&self, start: &StartSeed, rng: &mut R) -> Result<Vec<String>> {
		match start {
			StartSeed::Corpus => self
				.corpus_seed
				.clone()
				.ok_or_else(|| MarkovError::InvalidArgument("No seed available in the corpus".to_owned())),
			StartSeed::Random => self
				.chain
				.random_context(rng)
				.map(<[String]>::to_vec)
				.ok_or_else(|| MarkovError::InvalidArgument("No seed available, the model is empty".to_owned())),
			StartSeed::Custom(text) => {
				let seed = self.context_tokens(text);
				if seed.len() != self.order() {
					return Err(MarkovError::InvalidArgument(format!(
						"custom seed has {} {} tokens, expected {}",
						seed.len(),
						self.granularity.name(),
						self.order()
					)));
				}
				Ok(seed)
			}
		}
	}

	/// Generates text starting from `start`, rendered per granularity.
	///
	/// The output includes the seed and up to `length` generated tokens.
	pub fn generate<R: Rng>(&self, start: &StartSeed, length: usize, rng: &mut R) -> Result<String> {
		let seed = self.resolve_seed(start, rng)?;
		let tokens = self.chain.generate_with(&seed, length, rng)?;
		Ok(render(&tokens, self.granularity))
	}

	/// Probability that `token` follows the context written as `context`.
	///
	/// `context` is cleaned and tokenized; `token` is compared as given.
	pub fn probability(&self, context: &str, token: &str) -> f64 {
		let context = self.context_tokens(context);
		self.chain.probability_of(&context, &token.to_owned())
	}
}
