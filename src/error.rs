use std::fmt;

/// Matrix shape as `(rows, cols)`.
pub type Shape = (usize, usize);

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed or inconsistent input data. `row` is the 0-based data row when known.
    DataFormat { row: Option<usize>, msg: String },
    /// Incompatible operand shapes in a matrix operation.
    ShapeMismatch {
        op: String,
        left: Shape,
        right: Shape,
    },
    InvalidConfig(String),
    Io { path: String, msg: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn data(msg: impl Into<String>) -> Self {
        Error::DataFormat {
            row: None,
            msg: msg.into(),
        }
    }

    pub(crate) fn data_at(row: usize, msg: impl Into<String>) -> Self {
        Error::DataFormat {
            row: Some(row),
            msg: msg.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DataFormat { row: Some(row), msg } => {
                write!(f, "data format error at row {row}: {msg}")
            }
            Error::DataFormat { row: None, msg } => write!(f, "data format error: {msg}"),
            Error::ShapeMismatch { op, left, right } => write!(
                f,
                "shape mismatch in {op}: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::Io { path, msg } => write!(f, "i/o error on {path}: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_row_and_shapes() {
        let e = Error::data_at(4, "expected 3 fields, got 2");
        assert_eq!(
            e.to_string(),
            "data format error at row 4: expected 3 fields, got 2"
        );

        let e = Error::ShapeMismatch {
            op: "a1 * theta1^T".to_owned(),
            left: (3, 3),
            right: (4, 2),
        };
        assert_eq!(e.to_string(), "shape mismatch in a1 * theta1^T: 3x3 vs 4x2");
    }
}
