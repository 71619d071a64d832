use markov_text_core::io::{read_text, write_text};
use markov_text_core::pipeline::{ChainConfig, Query, RunConfig, run};
use rand::SeedableRng;
use rand::rngs::StdRng;

const ALICE: &str = "Alice was beginning to get very tired of sitting by her sister on the bank,
and of having nothing to do: once or twice she had peeped into the book her sister
was reading, but it had no pictures or conversations in it, 'and what is the use of
a book,' thought Alice 'without pictures or conversations?'";

#[test]
fn file_to_file_run() {
	let dir = tempfile::tempdir().unwrap();
	let input = dir.path().join("input.txt");
	let output = dir.path().join("result.txt");
	write_text(&input, ALICE).unwrap();

	let text = read_text(&input).unwrap();
	let mut rng = StdRng::seed_from_u64(42);
	let report = run(&text, &RunConfig::default(), &mut rng).unwrap();
	write_text(&output, &report.to_string()).unwrap();

	let written = read_text(&output).unwrap();
	assert!(written.starts_with("Generated Word Sequence:\nalice was beginning"));
	assert!(written.contains("\n\nGenerated Character Sequence:\nalic"));
	assert!(written.contains("Probability of 'to' following ('alice', 'was', 'beginning'): 1.0"));
	assert!(written.contains("Probability of 'e' following ('a', 'l', 'i', 'c'): 1.0"));
	assert!(!written.ends_with('\n'));
}

#[test]
fn generated_sequences_respect_lengths() {
	let config = RunConfig {
		word: ChainConfig { order: 1, length: 5 },
		char: ChainConfig { order: 2, length: 20 },
		word_queries: Vec::new(),
		char_queries: Vec::new(),
	};
	let mut rng = StdRng::seed_from_u64(7);
	let report = run(ALICE, &config, &mut rng).unwrap();

	let words = report.word_sequence.split(' ').count();
	assert!((1..=6).contains(&words), "{words} words");
	let chars = report.char_sequence.chars().count();
	assert!((2..=22).contains(&chars), "{chars} chars");
	assert!(report.probabilities.is_empty());
}

#[test]
fn same_seed_same_report() {
	let queries = vec![Query::new("of", "sitting"), Query::new("the", "book")];
	let config = RunConfig {
		word: ChainConfig { order: 1, length: 30 },
		word_queries: queries,
		..RunConfig::default()
	};
	let first = run(ALICE, &config, &mut StdRng::seed_from_u64(5)).unwrap();
	let second = run(ALICE, &config, &mut StdRng::seed_from_u64(5)).unwrap();
	assert_eq!(first, second);
	assert_eq!(first.probabilities.len(), 3);
}
