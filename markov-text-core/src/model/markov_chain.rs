use std::collections::HashMap;
use std::hash::Hash;

use log::debug;
use rand::Rng;
use rand::prelude::IteratorRandom;

use super::distribution::Distribution;
use crate::error::{MarkovError, Result};

/// Represents an order-k Markov chain over an arbitrary token type.
///
/// The `MarkovChain` maps each context (k consecutive tokens) to the
/// distribution of tokens observed immediately after it, and generates new
/// sequences by repeated weighted sampling over those distributions.
///
/// # Responsibilities
/// - Accumulate transition counts from token sequences
/// - Answer empirical transition probability queries
/// - Generate sequences from a seed context with a sliding window
/// - Merge with another chain of the same order
///
/// # Invariants
/// - `order` is always >= 1 and never changes
/// - Every context key holds exactly `order` tokens
/// - A context with no observed continuation is absent from the table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkovChain<T: Clone + Eq + Hash + Ord> {
	/// Number of tokens in a context.
	order: usize,

	/// Mapping from a context to the distribution of its continuations.
	table: HashMap<Vec<T>, Distribution<T>>,
}

impl<T: Clone + Eq + Hash + Ord> MarkovChain<T> {
	/// Creates an empty chain of order `order`.
	///
	/// # Errors
	/// Returns `InvalidConfiguration` if `order < 1`.
	pub fn new(order: usize) -> Result<Self> {
		if order < 1 {
			return Err(MarkovError::InvalidConfiguration(format!(
				"order must be >= 1, got {order}"
			)));
		}
		Ok(Self { order, table: HashMap::new() })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct contexts observed so far.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Iterates over every known context.
	pub fn contexts(&self) -> impl Iterator<Item = &[T]> {
		self.table.keys().map(Vec::as_slice)
	}

	/// Observed continuations of `context`, if any.
	pub fn distribution(&self, context: &[T]) -> Option<&Distribution<T>> {
		self.table.get(context)
	}

	/// Picks a known context uniformly at random.
	///
	/// Useful for starting a generation sequence.
	/// Returns `None` if the chain has no contexts.
	pub fn random_context<R: Rng>(&self, rng: &mut R) -> Option<&[T]> {
		self.table.keys().choose(rng).map(Vec::as_slice)
	}

	/// Adds a token sequence to the chain.
	///
	/// Every window of `order + 1` consecutive tokens increments the count
	/// of its last token under the context formed by the first `order`.
	///
	/// # Notes
	/// - Sequences of `order` tokens or fewer produce nothing.
	/// - Repeated calls accumulate counts.
	pub fn train(&mut self, tokens: &[T]) {
		if tokens.len() <= self.order {
			debug!(
				"Skipping training on {} tokens, order is {}",
				tokens.len(),
				self.order
			);
			return;
		}

		for window in tokens.windows(self.order + 1) {
			let (context, next) = window.split_at(self.order);
			self.table
				.entry(context.to_vec())
				.or_insert_with(Distribution::new)
				.add(next[0].clone());
		}

		debug!(
			"Trained on {} tokens, chain now holds {} contexts",
			tokens.len(),
			self.table.len()
		);
	}

	/// Empirical probability that `token` follows `context`.
	///
	/// Returns 0.0 for an unknown context or token.
	pub fn probability_of(&self, context: &[T], token: &T) -> f64 {
		match self.table.get(context) {
			Some(distribution) => distribution.probability(token),
			None => 0.0,
		}
	}

	/// Generates a sequence from `seed` using the thread-local random source.
	///
	/// See [`MarkovChain::generate_with`].
	pub fn generate(&self, seed: &[T], length: usize) -> Result<Vec<T>> {
		self.generate_with(seed, length, &mut rand::rng())
	}

	/// Generates up to `length` tokens after `seed`.
	///
	/// The returned sequence starts with the seed. Each step looks up the
	/// last `order` tokens and appends a token sampled from their
	/// distribution. Generation stops early, without error, when the current
	/// context was never observed.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `seed` does not hold exactly `order`
	/// tokens.
	pub fn generate_with<R: Rng>(&self, seed: &[T], length: usize, rng: &mut R) -> Result<Vec<T>> {
		if seed.len() != self.order {
			return Err(MarkovError::InvalidArgument(format!(
				"seed has {} tokens, expected {}",
				seed.len(),
				self.order
			)));
		}

		let mut output = seed.to_vec();
		for step in 0..length {
			let context = &output[output.len() - self.order..];
			let next = match self.table.get(context) {
				Some(distribution) => distribution.sample(rng).cloned(),
				None => None,
			};

			match next {
				Some(token) => output.push(token),
				None => {
					debug!("No transition after {step} generated tokens, stopping");
					break;
				}
			}
		}

		Ok(output)
	}

	/// Merges another chain into this one.
	///
	/// # Notes
	/// - Both chains must have the same order.
	/// - Occurrence counts for matching contexts and tokens are summed.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.order != other.order {
			return Err(MarkovError::InvalidArgument(format!(
				"order mismatch: self={}, other={}",
				self.order, other.order
			)));
		}

		for (context, distribution) in &other.table {
			if let Some(existing) = self.table.get_mut(context) {
				existing.merge(distribution);
			} else {
				self.table.insert(context.clone(), distribution.clone());
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn words(text: &str) -> Vec<String> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	fn the_cat() -> MarkovChain<String> {
		let mut chain = MarkovChain::new(2).unwrap();
		chain.train(&words("the cat sat the cat ran"));
		chain
	}

	#[test]
	fn order_zero_is_rejected() {
		let result = MarkovChain::<String>::new(0);
		assert!(matches!(result, Err(MarkovError::InvalidConfiguration(_))));
	}

	#[test]
	fn training_builds_expected_distribution() {
		let chain = the_cat();
		let d = chain.distribution(&words("the cat")).unwrap();
		assert_eq!(d.count(&"sat".to_string()), 1);
		assert_eq!(d.count(&"ran".to_string()), 1);
		assert_eq!(d.total(), 2);
		// (the cat), (cat sat), (sat the)
		assert_eq!(chain.len(), 3);
	}

	#[test]
	fn probability_matches_scenario() {
		let chain = the_cat();
		assert_relative_eq!(chain.probability_of(&words("the cat"), &"sat".to_string()), 0.5);
		assert_relative_eq!(chain.probability_of(&words("sat the"), &"cat".to_string()), 1.0);
		assert_eq!(chain.probability_of(&words("the cat"), &"flew".to_string()), 0.0);
	}

	#[test]
	fn unseen_context_has_zero_probability() {
		let chain = the_cat();
		for token in ["the", "cat", "sat", "ran"] {
			assert_eq!(chain.probability_of(&words("cat the"), &token.to_string()), 0.0);
		}
		assert_eq!(chain.probability_of(&words("the"), &"cat".to_string()), 0.0);
	}

	#[test]
	fn short_sequences_are_ignored() {
		let mut chain = MarkovChain::new(3).unwrap();
		chain.train(&words("one two three"));
		chain.train(&[]);
		assert!(chain.is_empty());
	}

	#[test]
	fn training_accumulates() {
		let mut chain = MarkovChain::new(1).unwrap();
		chain.train(&words("a b"));
		chain.train(&words("a b a c"));
		let d = chain.distribution(&words("a")).unwrap();
		assert_eq!(d.count(&"b".to_string()), 2);
		assert_eq!(d.count(&"c".to_string()), 1);
	}

	#[test]
	fn generate_zero_returns_seed() {
		let chain = the_cat();
		let seed = words("the cat");
		assert_eq!(chain.generate(&seed, 0).unwrap(), seed);
	}

	#[test]
	fn generate_from_unseen_seed_returns_seed() {
		let chain = the_cat();
		let seed = words("cat the");
		assert_eq!(chain.generate(&seed, 10).unwrap(), seed);
	}

	#[test]
	fn generate_rejects_wrong_seed_length() {
		let chain = the_cat();
		let result = chain.generate(&words("the"), 5);
		assert!(matches!(result, Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn degenerate_chain_is_deterministic() {
		let mut chain = MarkovChain::new(1).unwrap();
		chain.train(&words("a b c d"));
		let output = chain.generate(&words("a"), 10).unwrap();
		// Stops after "d", which has no continuation
		assert_eq!(output, words("a b c d"));
	}

	#[test]
	fn generate_one_picks_either_continuation() {
		let chain = the_cat();
		let mut rng = StdRng::seed_from_u64(2024);
		let trials = 2000;
		let mut sat = 0;
		for _ in 0..trials {
			let output = chain.generate_with(&words("the cat"), 1, &mut rng).unwrap();
			assert_eq!(output.len(), 3);
			match output[2].as_str() {
				"sat" => sat += 1,
				"ran" => (),
				other => panic!("unexpected token {other}"),
			}
		}
		let ratio = sat as f64 / trials as f64;
		assert!((0.4..0.6).contains(&ratio), "ratio was {ratio}");
	}

	#[test]
	fn same_rng_seed_gives_same_output() {
		let mut chain = MarkovChain::new(1).unwrap();
		chain.train(&words("a b a c a b c a a b c c b a"));
		let seed = words("a");
		let first = chain.generate_with(&seed, 30, &mut StdRng::seed_from_u64(9)).unwrap();
		let second = chain.generate_with(&seed, 30, &mut StdRng::seed_from_u64(9)).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn generated_length_is_bounded() {
		let chain = the_cat();
		let mut rng = StdRng::seed_from_u64(3);
		for length in 0..20 {
			let output = chain.generate_with(&words("the cat"), length, &mut rng).unwrap();
			assert!(output.len() >= 2);
			assert!(output.len() <= 2 + length);
		}
	}

	#[test]
	fn random_context_is_known() {
		let chain = the_cat();
		let mut rng = StdRng::seed_from_u64(5);
		let context = chain.random_context(&mut rng).unwrap();
		assert!(chain.distribution(context).is_some());

		let empty = MarkovChain::<String>::new(2).unwrap();
		assert!(empty.random_context(&mut rng).is_none());
	}

	#[test]
	fn merge_matches_sequential_training() {
		let a = words("the cat sat on the mat");
		let b = words("the cat ran to the mat");

		let mut sequential = MarkovChain::new(2).unwrap();
		sequential.train(&a);
		sequential.train(&b);

		let mut left = MarkovChain::new(2).unwrap();
		left.train(&a);
		let mut right = MarkovChain::new(2).unwrap();
		right.train(&b);
		left.merge(&right).unwrap();

		assert_eq!(left, sequential);
	}

	#[test]
	fn merge_rejects_order_mismatch() {
		let mut left = MarkovChain::<String>::new(2).unwrap();
		let right = MarkovChain::<String>::new(3).unwrap();
		assert!(matches!(left.merge(&right), Err(MarkovError::InvalidArgument(_))));
	}

	#[test]
	fn works_with_char_tokens() {
		let mut chain = MarkovChain::new(2).unwrap();
		let chars: Vec<char> = "abcabd".chars().collect();
		chain.train(&chars);
		assert_relative_eq!(chain.probability_of(&['a', 'b'], &'c'), 0.5);
		assert_relative_eq!(chain.probability_of(&['b', 'c'], &'a'), 1.0);
	}
}
