use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Reads a whole text file into a `String`.
pub fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Writes `contents` to `filename`, creating or truncating it.
pub fn write_text<P: AsRef<Path>>(filename: P, contents: &str) -> io::Result<()> {
	let mut file = File::create(filename)?;
	file.write_all(contents.as_bytes())?;
	file.flush()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn write_then_read() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("result.txt");
		write_text(&path, "Generated Word Sequence:\nthe cat").unwrap();
		assert_eq!(read_text(&path).unwrap(), "Generated Word Sequence:\nthe cat");

		write_text(&path, "short").unwrap();
		assert_eq!(read_text(&path).unwrap(), "short");
	}

	#[test]
	fn missing_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let error = read_text(dir.path().join("input.txt")).unwrap_err();
		assert_eq!(error.kind(), io::ErrorKind::NotFound);
	}
}
