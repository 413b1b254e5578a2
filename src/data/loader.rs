use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use super::model::{Dataset, Sample};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal input problems. Every variant carries the offending file name (and
/// the 1-based line number where applicable) so the CLI can report it
/// verbatim and abort the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file \"{0}\" not found.")]
    FileNotFound(String),

    #[error("cannot read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// A non-blank line with a token count other than three.
    #[error("unexpected input data in file {file}:{line}")]
    TokenCount { file: String, line: usize },

    /// A token that does not parse as a floating-point number.
    #[error("invalid number \"{token}\" in file {file}:{line}")]
    BadNumber {
        token: String,
        file: String,
        line: usize,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load one dump file into a [`Dataset`].
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    if !path.is_file() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(|source| LoadError::Io {
        file: path.display().to_string(),
        source,
    })?;

    parse_reader(
        &path.display().to_string(),
        Dataset::display_name(path),
        BufReader::new(file),
    )
}

/// Parse whitespace-triple lines from any reader.
///
/// One sample per non-blank line, exactly three whitespace-separated float
/// tokens. Blank lines are skipped; any other token count is fatal. `file`
/// is used for error reporting only.
pub fn parse_reader(
    file: &str,
    name: String,
    reader: impl BufRead,
) -> Result<Dataset, LoadError> {
    let mut samples = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            file: file.to_string(),
            source,
        })?;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 3 {
            return Err(LoadError::TokenCount {
                file: file.to_string(),
                line: idx + 1,
            });
        }

        let mut axes = [0.0f64; 3];
        for (axis, tok) in axes.iter_mut().zip(&tokens) {
            *axis = tok.parse().map_err(|_| LoadError::BadNumber {
                token: tok.to_string(),
                file: file.to_string(),
                line: idx + 1,
            })?;
        }
        samples.push(Sample::new(axes[0], axes[1], axes[2]));
    }

    Ok(Dataset { name, samples })
}
