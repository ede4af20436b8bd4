use thiserror::Error;

pub type Result<T> = core::result::Result<T, SelnmError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelnmError {
    #[error("Cannot add item with ID=\"{id}\" to \"{list}\" since the ID is already in use.")]
    DuplicateIdentifier { list: String, id: String },

    #[error("No item with ID=\"{id}\" in \"{list}\"")]
    KeyNotFound { list: String, id: String },

    #[error("Out of bounds: {0}")]
    OutOfRange(String),

    #[error("Data length ({len}) does not match dimensions ({rows}x{cols})")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    #[error("Cannot {operation} matrices with sizes {} and {}", shape(.lhs), shape(.rhs))]
    IncompatibleShape {
        operation: &'static str, // e.g., "add", "multiply"
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
}

fn shape(dims: &(usize, usize)) -> String {
    format!("({},{})", dims.0, dims.1)
}

#[cfg(test)]
mod tests {
    use super::SelnmError;

    #[test]
    fn test_incompatible_shape_message() {
        let err = SelnmError::IncompatibleShape {
            operation: "multiply",
            lhs: (2, 3),
            rhs: (2, 2),
        };
        assert_eq!(
            err.to_string(),
            "Cannot multiply matrices with sizes (2,3) and (2,2)"
        );
    }

    #[test]
    fn test_duplicate_identifier_message() {
        let err = SelnmError::DuplicateIdentifier {
            list: "test_list".to_string(),
            id: "first thing".to_string(),
        };
        assert!(err.to_string().contains("\"first thing\""));
        assert!(err.to_string().contains("\"test_list\""));
    }
}
