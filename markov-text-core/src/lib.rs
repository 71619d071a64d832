//! N-gram Markov chain text generation library.
//!
//! This crate provides:
//! - An order-k Markov chain over arbitrary tokens, with training,
//!   transition probability queries and weighted random generation
//! - Word-level and character-level text models built on top of it
//! - Text cleaning and tokenization helpers
//! - A batch pipeline producing a printable report
//!
//! ```
//! use markov_text_core::model::markov_chain::MarkovChain;
//!
//! let tokens: Vec<&str> = "the cat sat the cat ran".split(' ').collect();
//! let mut chain = MarkovChain::new(2).unwrap();
//! chain.train(&tokens);
//! assert_eq!(chain.probability_of(&["the", "cat"], &"sat"), 0.5);
//! ```

/// Error type shared by the whole crate.
pub mod error;

/// Core Markov chain models and generation logic.
pub mod model;

/// Text cleaning, tokenization and rendering.
pub mod text;

/// Batch run producing a report from one corpus.
pub mod pipeline;

/// I/O utilities (text source and result sink).
pub mod io;

pub use error::{MarkovError, Result};
pub use model::markov_chain::MarkovChain;
pub use model::text_model::{StartSeed, TextModel};
pub use text::Granularity;
