use std::collections::BTreeMap;

use rand::Rng;

/// Frequency distribution of the tokens observed right after one context.
///
/// Conceptually, this is the set of outgoing edges of a node in a Markov
/// chain, each edge weighted by its number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during training
/// - Answer empirical probability queries
/// - Pick the next token using weighted random sampling
/// - Merge with the distribution of the same context from another chain
///
/// ## Invariants
/// - Each stored occurrence count is strictly positive
/// - Tokens are kept ordered, so a given random stream always picks the
///   same token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution<T> {
	/// Outgoing transitions indexed by the next token.
	/// Example: { "cat" => 42, "dog" => 3 }
	transitions: BTreeMap<T, usize>,
}

impl<T: Ord + Clone> Distribution<T> {
	/// Creates an empty distribution.
	pub fn new() -> Self {
		Self { transitions: BTreeMap::new() }
	}

	/// Records one occurrence of `token`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is created with an initial count of 1.
	pub fn add(&mut self, token: T) {
		*self.transitions.entry(token).or_insert(0) += 1;
	}

	/// Number of times `token` was observed, 0 if never.
	pub fn count(&self, token: &T) -> usize {
		self.transitions.get(token).copied().unwrap_or(0)
	}

	/// Sum of all occurrence counts.
	pub fn total(&self) -> usize {
		self.transitions.values().sum()
	}

	/// Number of distinct tokens observed.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Iterates over `(token, count)` pairs in token order.
	pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
		self.transitions.iter().map(|(token, count)| (token, *count))
	}

	/// Empirical probability of `token`, in `[0.0, 1.0]`.
	///
	/// Returns 0.0 for an unknown token or an empty distribution.
	pub fn probability(&self, token: &T) -> f64 {
		let total = self.total();
		if total == 0 {
			return 0.0;
		}
		self.count(token) as f64 / total as f64
	}

	/// Picks a token with probability proportional to its count.
	///
	/// This method performs:
	/// - an O(n) scan over the transitions
	/// - a cumulative subtraction to select a bucket
	///
	/// Returns `None` if the distribution is empty.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&T> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (token, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(token);
			}
			r -= occurrence;
		}

		// Unreachable while counts sum to `total`
		self.transitions.keys().next_back()
	}

	/// Merges another distribution into this one, summing occurrence counts.
	pub fn merge(&mut self, other: &Self) {
		for (token, occurrence) in &other.transitions {
			*self.transitions.entry(token.clone()).or_insert(0) += *occurrence;
		}
	}
}

impl<T: Ord + Clone> Default for Distribution<T> {
	fn default() -> Self {
		Self::new()
	}
}
