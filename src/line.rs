//! The log record passed through every printer.

use std::fmt;

/// A single key/value log record.
///
/// Printers only ever see a `&Line` for the duration of one call.
///
/// # Example
///
/// ```rust
/// use klog::Line;
///
/// let line = Line::new("user_id", "42");
/// assert_eq!(line.to_string(), "<user_id> 42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Line {
    /// Structured key, usually built with [`keyf`](crate::keyf()).
    pub key: String,
    /// Raw value, rendered verbatim.
    pub value: String,
}

impl Line {
    /// Create a line from anything convertible to strings.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {}", self.key, self.value)
    }
}
