//! Profile reader: parses LinearCapR structural profile output.
//!
//! The format is line oriented:
//!
//! ```text
//! >seq_name
//! Bulge 0.01 0.02 ...
//! Exterior 0.5 0.4 ...
//! ```
//!
//! A header line starts with [`HEADER_MARKER`]; every other non-blank line is a
//! label followed by one value per sequence position.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Marker that opens a sequence record.
pub const HEADER_MARKER: char = '>';

/// Label -> per-position values for one sequence.
pub type LabeledVectors = BTreeMap<String, Vec<f64>>;

/// Sequence identifier -> profiles of that sequence.
pub type ProfileMap = BTreeMap<String, LabeledVectors>;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encountered data before sequence header in {} (line {line_no}): {line}", .path.display())]
    DataBeforeHeader {
        path: PathBuf,
        line_no: usize,
        line: String,
    },

    #[error("Failed to parse floats for {label} in {} (line {line_no}): {line}", .path.display())]
    InvalidFloat {
        path: PathBuf,
        label: String,
        line_no: usize,
        line: String,
        #[source]
        source: std::num::ParseFloatError,
    },
}

/// Parse a profile file from disk.
///
/// The file handle is dropped before returning, on success and on error.
pub fn parse_profile_file(path: &Path) -> Result<ProfileMap, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let profiles = parse_profile(BufReader::new(file), path)?;
    debug!(
        path = %path.display(),
        num_sequences = profiles.len(),
        "parsed profile file"
    );
    Ok(profiles)
}

/// Parse profiles from any buffered reader.
///
/// `source` is only used to name the input in error messages.
pub fn parse_profile<R: BufRead>(reader: R, source: &Path) -> Result<ProfileMap, ParseError> {
    let mut profiles = ProfileMap::new();
    let mut current: Option<String> = None;

    for (idx, raw) in reader.lines().enumerate() {
        let raw = raw.map_err(|source_err| ParseError::Io {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix(HEADER_MARKER) {
            profiles.insert(name.to_string(), LabeledVectors::new());
            current = Some(name.to_string());
            continue;
        }

        let Some(seq) = current.as_ref() else {
            return Err(ParseError::DataBeforeHeader {
                path: source.to_path_buf(),
                line_no: idx + 1,
                line: line.to_string(),
            });
        };

        let mut tokens = line.split_whitespace();
        // Non-blank after trimming, so there is always a first token.
        let label = tokens.next().unwrap_or_default();
        let values = tokens
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source_err| ParseError::InvalidFloat {
                path: source.to_path_buf(),
                label: label.to_string(),
                line_no: idx + 1,
                line: line.to_string(),
                source: source_err,
            })?;

        // A repeated label replaces the earlier vector.
        profiles
            .entry(seq.clone())
            .or_default()
            .insert(label.to_string(), values);
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(text: &str) -> Result<ProfileMap, ParseError> {
        parse_profile(Cursor::new(text), Path::new("test.txt"))
    }

    #[test]
    fn test_parse_two_sequences() {
        let text = ">seq1\nBulge 0.1 0.2\nHairpin 0.3 0.4\n\n>seq2\nStem 1 2 3\n";
        let profiles = parse_str(text).unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles["seq1"]["Bulge"], vec![0.1, 0.2]);
        assert_eq!(profiles["seq1"]["Hairpin"], vec![0.3, 0.4]);
        assert_eq!(profiles["seq2"]["Stem"], vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_blank_lines_and_trailing_spaces_ignored() {
        // LinearCapR writes a trailing space after every value.
        let text = "\n\n  >seq1  \nBulge 0.1 0.2 \n   \n\nExterior 0.5 \n";
        let profiles = parse_str(text).unwrap();

        assert!(profiles.contains_key("seq1"));
        assert_eq!(profiles["seq1"]["Bulge"], vec![0.1, 0.2]);
        assert_eq!(profiles["seq1"]["Exterior"], vec![0.5]);
    }

    #[test]
    fn test_header_keeps_inner_whitespace() {
        let profiles = parse_str(">seq 1 description\nStem 0\n").unwrap();
        assert!(profiles.contains_key("seq 1 description"));
    }

    #[test]
    fn test_label_without_values_is_empty_vector() {
        let profiles = parse_str(">s\nBulge\n").unwrap();
        assert!(profiles["s"]["Bulge"].is_empty());
    }

    #[test]
    fn test_header_without_data_is_kept() {
        let profiles = parse_str(">empty\n>full\nStem 1\n").unwrap();
        assert!(profiles["empty"].is_empty());
        assert_eq!(profiles["full"].len(), 1);
    }

    #[test]
    fn test_duplicate_header_resets_record() {
        let profiles = parse_str(">s\nStem 1\n>s\nBulge 2\n").unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles["s"].len(), 1);
        assert!(!profiles["s"].contains_key("Stem"));
        assert_eq!(profiles["s"]["Bulge"], vec![2.0]);
    }

    #[test]
    fn test_duplicate_label_overwrites() {
        let profiles = parse_str(">s\nStem 1 2\nStem 3\n").unwrap();
        assert_eq!(profiles["s"]["Stem"], vec![3.0]);
    }

    #[test]
    fn test_scientific_notation() {
        let profiles = parse_str(">s\nBulge 1e-05 2.5E3 -0\n").unwrap();
        assert_eq!(profiles["s"]["Bulge"], vec![1e-5, 2500.0, 0.0]);
    }

    #[test]
    fn test_data_before_header_fails() {
        let err = parse_str("Bulge 0.1\n>seq1\n").unwrap_err();
        match &err {
            ParseError::DataBeforeHeader { line_no, line, .. } => {
                assert_eq!(*line_no, 1);
                assert_eq!(line, "Bulge 0.1");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("test.txt"));
    }

    #[test]
    fn test_invalid_float_fails() {
        let err = parse_str(">s\n\nHairpin 0.1 abc\n").unwrap_err();
        match &err {
            ParseError::InvalidFloat { label, line_no, .. } => {
                assert_eq!(label, "Hairpin");
                assert_eq!(*line_no, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("Hairpin"));
        assert!(msg.contains("test.txt"));
        assert!(msg.contains("0.1 abc"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_profile_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn test_parse_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.txt");
        std::fs::write(&path, ">seq1\nHairpin 0.1 0.2 0.3\n").unwrap();

        let profiles = parse_profile_file(&path).unwrap();
        assert_eq!(profiles["seq1"]["Hairpin"], vec![0.1, 0.2, 0.3]);
    }
}
