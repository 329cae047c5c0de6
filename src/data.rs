//! Dataset loading.
//!
//! A dataset file holds one example per line: the first field is the integer
//! class label, the remaining fields are the flattened pixel features. The whole
//! file is read into memory and split into the label vector `y` and the
//! `(m, n)` feature matrix `X`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::debug;

use crate::{Error, Matrix, Result};

/// How to read a delimited dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Field separator, `b','` by default.
    pub delimiter: u8,
    /// Skip the first line. Off by default: every line is a data row.
    pub has_headers: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
        }
    }
}

/// Labels (y) and features (X) for `m` examples.
///
/// Never empty: every constructor rejects zero rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    labels: Vec<u32>,
    features: Matrix,
}

impl Dataset {
    /// Pair a label vector with a feature matrix of the same length.
    pub fn from_parts(labels: Vec<u32>, features: Matrix) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::data("dataset must not be empty"));
        }
        if labels.len() != features.rows() {
            return Err(Error::data(format!(
                "labels/features length mismatch: {} vs {}",
                labels.len(),
                features.rows()
            )));
        }
        if features.cols() == 0 {
            return Err(Error::data("examples must have at least one feature"));
        }
        Ok(Self { labels, features })
    }

    /// Load a delimited file from disk.
    pub fn load<P: AsRef<Path>>(path: P, config: &LoaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;
        read_delimited(file, config, &path.display().to_string())
    }

    /// Load delimited data from any reader.
    pub fn from_reader<R: Read>(reader: R, config: &LoaderConfig) -> Result<Self> {
        read_delimited(reader, config, "<reader>")
    }

    /// Number of examples (m).
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed dataset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Features per example (n).
    #[inline]
    pub fn num_features(&self) -> usize {
        self.features.cols()
    }

    /// Class labels (y), one per example.
    #[inline]
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Feature matrix (X) with shape `(m, n)`.
    #[inline]
    pub fn features(&self) -> &Matrix {
        &self.features
    }

    /// Smallest and largest label present.
    pub fn label_range(&self) -> (u32, u32) {
        let min = self.labels.iter().copied().min().unwrap_or(0);
        let max = self.labels.iter().copied().max().unwrap_or(0);
        (min, max)
    }
}

fn read_delimited<R: Read>(reader: R, config: &LoaderConfig, source: &str) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut width: Option<usize> = None;
    let mut labels = Vec::new();
    let mut values = Vec::new();

    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| {
            if e.is_io_error() {
                Error::Io {
                    path: source.to_owned(),
                    msg: e.to_string(),
                }
            } else {
                Error::data_at(row, format!("malformed record: {e}"))
            }
        })?;

        let line = record.position().map(|p| p.line());
        let fail = |msg: String| match line {
            Some(line) => Error::data_at(row, format!("line {line}: {msg}")),
            None => Error::data_at(row, msg),
        };

        let expected = *width.get_or_insert(record.len());
        if expected < 2 {
            return Err(fail(format!(
                "expected a label and at least one feature, found {expected} field(s)"
            )));
        }
        if record.len() != expected {
            return Err(fail(format!(
                "expected {expected} fields, found {}",
                record.len()
            )));
        }

        labels.push(parse_label(&record[0]).ok_or_else(|| {
            fail(format!(
                "label {:?} is not a non-negative integer",
                &record[0]
            ))
        })?);

        for (col, field) in record.iter().enumerate().skip(1) {
            values.push(
                parse_feature(field)
                    .map_err(|msg| fail(format!("column {col}: {field:?} {msg}")))?,
            );
        }
    }

    let Some(width) = width else {
        return Err(Error::data(format!("{source} contains no data rows")));
    };

    let m = labels.len();
    let features = Matrix::from_flat(values, m, width - 1)?;
    debug!("loaded {m} examples x {} features from {source}", width - 1);

    Dataset::from_parts(labels, features)
}

/// Labels may be written as `3` or `3.0`; anything fractional or negative is rejected.
fn parse_label(field: &str) -> Option<u32> {
    if let Ok(v) = field.parse::<u32>() {
        return Some(v);
    }
    let v = field.parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) {
        Some(v as u32)
    } else {
        None
    }
}

fn parse_feature(field: &str) -> std::result::Result<f32, &'static str> {
    let v: f32 = field.parse().map_err(|_| "is not numeric")?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err("is not finite")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Result<Dataset> {
        Dataset::from_reader(text.as_bytes(), &LoaderConfig::default())
    }

    #[test]
    fn splits_labels_from_features() {
        let ds = load("1,0.1,0.2\n2,0.3,0.4\n3,0.5,0.6\n").unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.num_features(), 2);
        assert_eq!(ds.labels(), &[1, 2, 3]);
        assert_eq!(ds.features().shape(), (3, 2));
        assert_eq!(ds.features().row(2), &[0.5, 0.6]);
        assert_eq!(ds.label_range(), (1, 3));
    }

    #[test]
    fn empty_input_is_a_format_error() {
        assert!(matches!(load(""), Err(Error::DataFormat { row: None, .. })));
        assert!(matches!(load("\n\n"), Err(Error::DataFormat { .. })));
    }

    #[test]
    fn ragged_row_is_reported_by_index() {
        let err = load("1,0.1,0.2\n2,0.3\n3,0.5,0.6\n").unwrap_err();
        assert!(matches!(err, Error::DataFormat { row: Some(1), .. }), "{err}");
        assert!(err.to_string().contains("expected 3 fields, found 2"));
    }

    #[test]
    fn errors_name_the_file_line_past_blank_lines() {
        let err = load("1,0.1,0.2\n\n\n2,0.3\n").unwrap_err();
        assert!(matches!(err, Error::DataFormat { row: Some(1), .. }), "{err}");
        assert!(err.to_string().contains("line 4"), "{err}");

        let cfg = LoaderConfig {
            has_headers: true,
            ..LoaderConfig::default()
        };
        let err = Dataset::from_reader("label,p0\n1,0.5\n2,x\n".as_bytes(), &cfg).unwrap_err();
        assert!(matches!(err, Error::DataFormat { row: Some(1), .. }), "{err}");
        assert!(err.to_string().contains("line 3"), "{err}");
    }

    #[test]
    fn non_numeric_field_is_reported_with_column() {
        let err = load("1,0.1,0.2\n2,0.3,abc\n").unwrap_err();
        assert!(matches!(err, Error::DataFormat { row: Some(1), .. }));
        assert!(err.to_string().contains("column 2"), "{err}");

        assert!(load("1,0.1,NaN\n").is_err());
    }

    #[test]
    fn labels_must_be_non_negative_integers() {
        assert_eq!(load("4.0,0.5\n").unwrap().labels(), &[4]);
        assert!(matches!(
            load("1.5,0.5\n"),
            Err(Error::DataFormat { row: Some(0), .. })
        ));
        assert!(load("-1,0.5\n").is_err());
        assert!(load("a,0.5\n").is_err());
    }

    #[test]
    fn label_only_rows_are_rejected() {
        assert!(matches!(
            load("1\n2\n"),
            Err(Error::DataFormat { row: Some(0), .. })
        ));
    }

    #[test]
    fn honours_delimiter_and_header_settings() {
        let cfg = LoaderConfig {
            delimiter: b';',
            has_headers: true,
        };
        let ds = Dataset::from_reader("label;p0;p1\n7; 0.25 ;1\n".as_bytes(), &cfg).unwrap();
        assert_eq!(ds.labels(), &[7]);
        assert_eq!(ds.features().row(0), &[0.25, 1.0]);
    }

    #[test]
    fn from_parts_checks_lengths() {
        let x = Matrix::zeros(2, 3);
        assert!(Dataset::from_parts(vec![1, 2], x.clone()).is_ok());
        assert!(Dataset::from_parts(vec![1], x).is_err());
        assert!(Dataset::from_parts(vec![1], Matrix::zeros(1, 0)).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Dataset::load("/definitely/not/here.csv", &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
