use std::fmt;

/// Represents errors that can occur when compiling a template line.
///
/// ```
/// use tagmatch::{ParseError, Router};
/// let err = Router::new("a.b template extra junk").unwrap_err();
/// assert_eq!(
///     err,
///     ParseError::InvalidLine {
///         line: "a.b template extra junk".into()
///     }
/// );
/// ```
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ParseError {
    /// A template line did not split into one, two, or three
    /// whitespace-delimited fields.
    InvalidLine {
        /// The offending configuration line.
        line: String,
    },
    /// A fragment of the tag field was not of the form `key=value`.
    InvalidTag {
        /// The offending `key=value` fragment.
        pair: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLine { line } => {
                write!(f, "invalid template line: {}", line)
            }
            Self::InvalidTag { pair } => {
                write!(f, "invalid tag part: {}", pair)
            }
        }
    }
}

impl std::error::Error for ParseError {}
