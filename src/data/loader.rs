use std::io;
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while reading a sample file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No such file: '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: '{content}' is not a number", path.display())]
    Parse {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        content: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("{}:{line}: '{content}' is not a finite number", path.display())]
    NotFinite {
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        content: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a file holding one number per line.
///
/// Lines that are empty after trimming are skipped. Any other line must parse
/// as a finite `f64`; the first one that does not aborts the whole load.
pub fn read_samples(path: &Path) -> Result<Vec<f64>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let samples = parse_samples(&text, path)?;
    log::info!("Read {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

fn parse_samples(text: &str, path: &Path) -> Result<Vec<f64>, LoadError> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let trimmed = line.trim();
            (!trimmed.is_empty()).then_some((i + 1, trimmed))
        })
        .map(|(line, tok)| {
            let value = tok.parse::<f64>().map_err(|source| LoadError::Parse {
                path: path.to_path_buf(),
                line,
                content: tok.to_string(),
                source,
            })?;
            // `str::parse` accepts "nan" and "inf".
            if !value.is_finite() {
                return Err(LoadError::NotFinite {
                    path: path.to_path_buf(),
                    line,
                    content: tok.to_string(),
                });
            }
            Ok(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_values_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "Minicore", "3.5\n-1\n2e2\n0.25\n");

        let samples = read_samples(&path).unwrap();

        assert_eq!(samples, vec![3.5, -1.0, 200.0, 0.25]);
    }

    #[rstest]
    #[case("1\n2\n3\n")]
    #[case("\n1\n2\n3\n")]
    #[case("1\n\n\n2\n3")]
    #[case("  1  \n\t\n2\r\n   \n3\n\n")]
    fn blank_lines_do_not_change_output(#[case] contents: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "samples", contents);

        assert_eq!(read_samples(&path).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn only_blank_lines_yield_empty_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "empty", "\n   \n\n");

        assert!(read_samples(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist");

        let err = read_samples(&path).unwrap_err();

        assert!(matches!(err, LoadError::NotFound { path: p } if p == path));
    }

    #[test]
    fn malformed_line_aborts_with_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad", "1.0\n\nabc\n2.0\n");

        let err = read_samples(&path).unwrap_err();

        match err {
            LoadError::Parse { line, content, .. } => {
                assert_eq!(line, 3);
                assert_eq!(content, "abc");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[rstest]
    #[case("nan")]
    #[case("NaN")]
    #[case("inf")]
    #[case("-inf")]
    #[case("infinity")]
    #[case("1e400")]
    fn non_finite_value_is_rejected(#[case] token: &str) {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "samples", &format!("1\n{token}\n3\n"));

        let err = read_samples(&path).unwrap_err();

        match err {
            LoadError::NotFinite { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, token);
            }
            other => panic!("expected non-finite error, got {other:?}"),
        }
    }

    #[test]
    fn parse_error_message_names_file_and_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad", "abc\n");

        let message = read_samples(&path).unwrap_err().to_string();

        assert!(message.ends_with(":1: 'abc' is not a number"), "{message}");
    }
}
