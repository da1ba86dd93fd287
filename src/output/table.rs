//! Delimited Sherwood tables
//!
//! One row per `(Péclet, radius parameter, Sherwood)` triple, one header
//! row, optional `#`-prefixed metadata comments. The same format serves two
//! masters:
//!
//! - the sweep drivers persist their results with [`write_sherwood_table`];
//! - the external finite-element solver delivers its reference values in the
//!   same shape, loaded back with [`read_sherwood_table`] for comparison.
//!
//! # Example file
//!
//! ```csv
//! # Sherwood sweep
//! # Generated: 2026-08-04T12:00:00+00:00
//! Peclet,radius,Sherwood
//! 100000.0,0.995,24.488
//! 1000000.0,0.995,243.1
//! ```

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

// =================================================================================================
// Record
// =================================================================================================

/// One row of a Sherwood table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SherwoodRecord {
    /// Péclet number
    pub peclet: f64,

    /// Radius parameter the external solver keys rows by
    pub radius: f64,

    /// Sherwood number
    pub sherwood: f64,
}

// =================================================================================================
// Configuration
// =================================================================================================

/// Configuration for table export
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Metadata key/value pairs written as `#` comments before the header
    pub metadata: Vec<(String, String)>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            metadata: Vec::new(),
        }
    }
}

impl TableConfig {
    /// Tab-separated variant (the historical sweep format).
    pub fn tab_separated() -> Self {
        Self {
            delimiter: '\t',
            ..Default::default()
        }
    }

    /// Builder pattern: attach a metadata comment line.
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.push((key.to_string(), value.to_string()));
        self
    }
}

// =================================================================================================
// Errors
// =================================================================================================

/// Errors specific to table I/O
///
/// A typed error rather than a boxed one so callers can distinguish a bad
/// file path from a malformed row.
#[derive(Debug)]
pub enum TableError {
    /// Underlying filesystem failure
    Io(std::io::Error),

    /// Refusing to write a table with no rows
    Empty,

    /// A record holds NaN or infinite values
    NonFinite { row: usize },

    /// The file ended before a header row was found
    MissingHeader,

    /// A data line did not parse into three numeric columns
    Parse { line: usize, message: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "I/O error: {}", e),
            TableError::Empty => write!(f, "refusing to write an empty table"),
            TableError::NonFinite { row } => {
                write!(f, "record {} holds a non-finite value", row)
            }
            TableError::MissingHeader => write!(f, "no header row found"),
            TableError::Parse { line, message } => {
                write!(f, "line {}: {}", line, message)
            }
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TableError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        TableError::Io(e)
    }
}

// =================================================================================================
// Writing
// =================================================================================================

/// Write a Sherwood table with a header row.
///
/// Metadata pairs from the config are written first as `#` comments,
/// followed by a generation timestamp, the header, and one row per record.
///
/// # Errors
///
/// [`TableError::Empty`] for an empty record slice, [`TableError::NonFinite`]
/// when a record holds NaN/∞, or an I/O failure.
pub fn write_sherwood_table(
    records: &[SherwoodRecord],
    path: impl AsRef<Path>,
    config: Option<&TableConfig>,
) -> Result<(), TableError> {
    let default_config = TableConfig::default();
    let config = config.unwrap_or(&default_config);

    if records.is_empty() {
        return Err(TableError::Empty);
    }
    for (row, record) in records.iter().enumerate() {
        if !(record.peclet.is_finite() && record.radius.is_finite() && record.sherwood.is_finite())
        {
            return Err(TableError::NonFinite { row });
        }
    }

    let mut file = File::create(path)?;

    if !config.metadata.is_empty() {
        for (key, value) in &config.metadata {
            writeln!(file, "# {}: {}", key, value)?;
        }
        writeln!(file, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;
    }

    let d = config.delimiter;
    writeln!(file, "Peclet{}radius{}Sherwood", d, d)?;
    for record in records {
        writeln!(
            file,
            "{:.prec$}{}{:.prec$}{}{:.prec$}",
            record.peclet,
            d,
            record.radius,
            d,
            record.sherwood,
            prec = config.precision
        )?;
    }

    Ok(())
}

// =================================================================================================
// Reading
// =================================================================================================

/// Read a Sherwood table: `#` comments are skipped, the first remaining
/// line is taken as the header, every further non-empty line must parse
/// into three numeric columns.
///
/// Columns may be separated by the configured delimiter or by whitespace
/// (the external solver emits both variants).
pub fn read_sherwood_table(
    path: impl AsRef<Path>,
    config: Option<&TableConfig>,
) -> Result<Vec<SherwoodRecord>, TableError> {
    let default_config = TableConfig::default();
    let config = config.unwrap_or(&default_config);

    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();
    let mut header_seen = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !header_seen {
            header_seen = true;
            continue;
        }

        let fields: Vec<&str> = trimmed
            .split(|c: char| c == config.delimiter || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if fields.len() < 3 {
            return Err(TableError::Parse {
                line: index + 1,
                message: format!("expected 3 columns, found {}", fields.len()),
            });
        }

        let mut values = [0.0_f64; 3];
        for (slot, field) in values.iter_mut().zip(fields.iter()) {
            *slot = field.parse().map_err(|_| TableError::Parse {
                line: index + 1,
                message: format!("'{}' is not a number", field),
            })?;
        }

        records.push(SherwoodRecord {
            peclet: values[0],
            radius: values[1],
            sherwood: values[2],
        });
    }

    if !header_seen {
        return Err(TableError::MissingHeader);
    }

    Ok(records)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("pesh_rs_table_{}_{}", std::process::id(), name));
        path
    }

    fn sample_records() -> Vec<SherwoodRecord> {
        vec![
            SherwoodRecord {
                peclet: 1.0e5,
                radius: 0.995,
                sherwood: 24.5,
            },
            SherwoodRecord {
                peclet: 1.0e6,
                radius: 0.995,
                sherwood: 243.0,
            },
        ]
    }

    #[test]
    fn test_write_read_round_trip() {
        let path = scratch_path("round_trip.csv");
        write_sherwood_table(&sample_records(), &path, None).unwrap();
        let back = read_sherwood_table(&path, None).unwrap();

        assert_eq!(back.len(), 2);
        assert!((back[0].peclet - 1.0e5).abs() < 1e-6);
        assert!((back[1].sherwood - 243.0).abs() < 1e-6);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_metadata_header_is_commented() {
        let path = scratch_path("metadata.csv");
        let config = TableConfig::default().with_metadata("sweep", "demo");
        write_sherwood_table(&sample_records(), &path, Some(&config)).unwrap();

        let mut text = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert!(text.starts_with("# sweep: demo"));
        assert!(text.contains("# Generated:"));
        assert!(text.contains("Peclet,radius,Sherwood"));

        // Comments must not confuse the reader.
        let back = read_sherwood_table(&path, None).unwrap();
        assert_eq!(back.len(), 2);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_tab_separated_reference_format() {
        let path = scratch_path("tabs.txt");
        let config = TableConfig::tab_separated();
        write_sherwood_table(&sample_records(), &path, Some(&config)).unwrap();
        let back = read_sherwood_table(&path, Some(&config)).unwrap();
        assert_eq!(back, sample_records_rounded());
        std::fs::remove_file(&path).ok();
    }

    fn sample_records_rounded() -> Vec<SherwoodRecord> {
        // Written at 6 decimal places; these values are exactly representable.
        sample_records()
    }

    #[test]
    fn test_rejects_empty_table() {
        let path = scratch_path("empty.csv");
        assert!(matches!(
            write_sherwood_table(&[], &path, None),
            Err(TableError::Empty)
        ));
    }

    #[test]
    fn test_rejects_non_finite_record() {
        let path = scratch_path("nan.csv");
        let records = [SherwoodRecord {
            peclet: f64::NAN,
            radius: 0.5,
            sherwood: 1.0,
        }];
        assert!(matches!(
            write_sherwood_table(&records, &path, None),
            Err(TableError::NonFinite { row: 0 })
        ));
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let path = scratch_path("malformed.csv");
        std::fs::write(&path, "Peclet,radius,Sherwood\n1.0,oops,3.0\n").unwrap();

        match read_sherwood_table(&path, None) {
            Err(TableError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_header_only_file_is_empty_table() {
        let path = scratch_path("header_only.csv");
        std::fs::write(&path, "Peclet,radius,Sherwood\n").unwrap();
        let back = read_sherwood_table(&path, None).unwrap();
        assert!(back.is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_without_header_is_error() {
        let path = scratch_path("no_header.csv");
        std::fs::write(&path, "# only comments\n").unwrap();
        assert!(matches!(
            read_sherwood_table(&path, None),
            Err(TableError::MissingHeader)
        ));
        std::fs::remove_file(&path).ok();
    }
}
