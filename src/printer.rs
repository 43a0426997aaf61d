//! The `Printer` capability and its built-in variants.
//!
//! A [`Printer`] is a stage in the printing pipeline: it accepts one
//! [`Line`] and does whatever delivery it wants with it. There is no error
//! channel; a printer that fails to deliver drops the line.
//!
//! # Variants
//!
//! - [`PrinterFunc`] - lift any `Fn(&Line)` into a printer
//! - [`NilPrinter`] - discard everything
//! - [`LogPrinter`] - forward `<key> value` to `tracing`
//!
//! # Example
//!
//! ```rust
//! use klog::{printer_fn, Line, NilPrinter, Printer};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let seen = AtomicUsize::new(0);
//! let counting = printer_fn(|_line: &Line| {
//!     seen.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! counting.print(&Line::new("k", "v"));
//! NilPrinter.print(&Line::new("k", "v"));
//!
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::Level;

use crate::line::Line;

/// A stage in the printing pipeline.
///
/// Implementations must be cheap and best-effort: `print` should never
/// block indefinitely and never panic on a well-formed line.
pub trait Printer: Send + Sync {
    /// Deliver a single line.
    fn print(&self, line: &Line);
}

impl<P: Printer + ?Sized> Printer for &P {
    fn print(&self, line: &Line) {
        (**self).print(line)
    }
}

impl<P: Printer + ?Sized> Printer for Box<P> {
    fn print(&self, line: &Line) {
        (**self).print(line)
    }
}

impl<P: Printer + ?Sized> Printer for Arc<P> {
    fn print(&self, line: &Line) {
        (**self).print(line)
    }
}

/// Adapter implementing [`Printer`] for plain functions and closures.
///
/// `PrinterFunc::new(f).print(line)` is exactly `f(line)`.
#[derive(Clone, Copy)]
pub struct PrinterFunc<F>(pub F);

impl<F> PrinterFunc<F>
where
    F: Fn(&Line) + Send + Sync,
{
    /// Wrap a function. Construction never fails.
    pub fn new(f: F) -> Self {
        PrinterFunc(f)
    }

    /// Unwrap the inner function.
    pub fn into_inner(self) -> F {
        self.0
    }
}

impl<F> Printer for PrinterFunc<F>
where
    F: Fn(&Line) + Send + Sync,
{
    fn print(&self, line: &Line) {
        (self.0)(line)
    }
}

impl<F> fmt::Debug for PrinterFunc<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterFunc")
            .field("fn", &std::any::type_name::<F>())
            .finish()
    }
}

/// Lift a function into a [`Printer`].
///
/// ```rust
/// use klog::{printer_fn, Line, Printer};
///
/// let p = printer_fn(|line: &Line| assert_eq!(line.key, "k"));
/// p.print(&Line::new("k", "v"));
/// ```
pub fn printer_fn<F>(f: F) -> PrinterFunc<F>
where
    F: Fn(&Line) + Send + Sync,
{
    PrinterFunc::new(f)
}

/// A printer that discards every line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NilPrinter;

/// Shared instance of [`NilPrinter`].
pub const NIL_PRINTER: NilPrinter = NilPrinter;

impl Printer for NilPrinter {
    #[inline]
    fn print(&self, _line: &Line) {}
}

/// Forwards lines to `tracing` as `<key> value`.
///
/// Nothing is printed unless the host installs a subscriber; an event with
/// no interested subscriber is dropped silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogPrinter {
    level: Level,
}

impl LogPrinter {
    /// Forward at `INFO`.
    pub const fn new() -> Self {
        Self { level: Level::INFO }
    }

    /// Forward at the given level.
    pub const fn with_level(level: Level) -> Self {
        Self { level }
    }

    /// The level events are emitted at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for LogPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer for LogPrinter {
    fn print(&self, line: &Line) {
        // event levels must be constant at the callsite
        if self.level == Level::ERROR {
            tracing::error!("{}", line);
        } else if self.level == Level::WARN {
            tracing::warn!("{}", line);
        } else if self.level == Level::DEBUG {
            tracing::debug!("{}", line);
        } else if self.level == Level::TRACE {
            tracing::trace!("{}", line);
        } else {
            tracing::info!("{}", line);
        }
    }
}

/// Forward a line to `tracing` at `INFO` as `<key> value`.
pub fn log_printer(line: &Line) {
    LogPrinter::new().print(line)
}
