//! Printers for asserting on log output in tests.
//!
//! # Example
//!
//! ```rust
//! use klog::testing::CapturePrinter;
//! use klog::{Line, Printer};
//!
//! let capture = CapturePrinter::new();
//! capture.print(&Line::new("user_id", "42"));
//!
//! assert!(capture.contains("user_id", "42"));
//! assert_eq!(capture.len(), 1);
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use klog::assert_printed;
//! use klog::testing::CapturePrinter;
//! use klog::{Line, Printer};
//!
//! let capture = CapturePrinter::new();
//! capture.print(&Line::new("disk", "full"));
//! assert_printed!(capture, "disk", "full");
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::line::Line;
use crate::printer::Printer;

/// Records every line it receives, in order.
#[derive(Debug, Default)]
pub struct CapturePrinter {
    lines: Mutex<Vec<Line>>,
}

impl CapturePrinter {
    /// Create an empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking test thread must not hide lines from the others.
    fn guard(&self) -> MutexGuard<'_, Vec<Line>> {
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of every captured line.
    pub fn lines(&self) -> Vec<Line> {
        self.guard().clone()
    }

    /// Number of captured lines.
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Drop all captured lines.
    pub fn clear(&self) {
        self.guard().clear()
    }

    /// Whether a line with exactly this key and value was captured.
    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.guard()
            .iter()
            .any(|line| line.key == key && line.value == value)
    }
}

impl Printer for CapturePrinter {
    fn print(&self, line: &Line) {
        self.guard().push(line.clone())
    }
}

/// Counts calls without keeping the lines.
#[derive(Debug, Default)]
pub struct CountingPrinter {
    count: AtomicUsize,
}

impl CountingPrinter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines printed so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl Printer for CountingPrinter {
    fn print(&self, _line: &Line) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Assert that a [`CapturePrinter`] received a line.
///
/// This macro will panic if no captured line has exactly this key and value.
#[macro_export]
macro_rules! assert_printed {
    ($capture:expr, $key:expr, $value:expr) => {{
        let capture = &$capture;
        if !capture.contains($key, $value) {
            panic!(
                "Expected line <{}> {}, got: {:?}",
                $key,
                $value,
                capture.lines()
            );
        }
    }};
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for Line {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (any::<String>(), any::<String>())
            .prop_map(|(key, value)| Line::new(key, value))
            .boxed()
    }
}

#[cfg(feature = "proptest")]
impl Arbitrary for crate::key::Arg {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        use crate::key::Arg;
        prop_oneof![
            any::<String>().prop_map(Arg::Str),
            any::<i64>().prop_map(Arg::Int),
            any::<u64>().prop_map(Arg::Uint),
            any::<f64>().prop_map(Arg::Float),
            any::<bool>().prop_map(Arg::Bool),
            any::<char>().prop_map(Arg::Char),
        ]
        .boxed()
    }
}
