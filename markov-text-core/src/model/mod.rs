//! Markov chain models.
//!
//! - Per-context transition counts (`Distribution`)
//! - Token-level order-k chain (`MarkovChain`)
//! - Text-level chain bound to a tokenization level (`TextModel`)

/// Frequency distribution of the tokens following one context.
///
/// Supports counting, probability queries, weighted random sampling
/// and merging.
pub mod distribution;

/// Order-k Markov chain over any token type.
///
/// Handles training on token sequences, transition probability queries,
/// seeded generation and model merging.
pub mod markov_chain;

/// Markov chain fed with raw text at word or character level.
pub mod text_model;
