//! Process-wide printer bindings.
//!
//! Two slots select which printer the severity call sites use:
//!
//! - [`default_printer`] for [`kprint`](crate::kprint)
//! - [`default_fatal_printer`] for [`kpanic`](crate::kpanic) and
//!   [`kfatal`](crate::kfatal)
//!
//! Both start out as [`LogPrinter::new`] and can be replaced at any time,
//! independently of each other, from any thread.
//!
//! # Thread safety
//!
//! Each slot holds its printer in an [`ArcSwap`]. Reading a slot takes an
//! atomic snapshot and replacing it is a single pointer swap, so a reader
//! always sees one complete printer: either the old one or the new one.
//! A `print` already in flight keeps running against the printer it loaded,
//! even if that printer has since been replaced.
//!
//! # Example
//!
//! ```rust
//! use klog::registry::PrinterSlot;
//! use klog::{Line, NilPrinter, Printer};
//!
//! let slot = PrinterSlot::new("audit", NilPrinter);
//! slot.print(&Line::new("k", "v"));
//!
//! let previous = slot.reset();
//! slot.store(previous);
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::line::Line;
use crate::printer::{LogPrinter, Printer};

/// A type-erased printer as stored in a slot.
pub type BoxedPrinter = Box<dyn Printer>;

/// A named, atomically replaceable printer binding.
pub struct PrinterSlot {
    name: &'static str,
    current: ArcSwap<BoxedPrinter>,
}

impl PrinterSlot {
    /// Create a slot bound to `printer`.
    pub fn new<P>(name: &'static str, printer: P) -> Self
    where
        P: Printer + 'static,
    {
        Self {
            name,
            current: ArcSwap::from_pointee(Box::new(printer) as BoxedPrinter),
        }
    }

    /// The slot's name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Snapshot of the currently bound printer.
    pub fn get(&self) -> Arc<BoxedPrinter> {
        self.current.load_full()
    }

    /// Bind `printer`, returning the one it replaced.
    pub fn replace<P>(&self, printer: P) -> Arc<BoxedPrinter>
    where
        P: Printer + 'static,
    {
        let boxed: BoxedPrinter = Box::new(printer);
        self.store(Arc::new(boxed))
    }

    /// Bind an already shared printer, returning the one it replaced.
    ///
    /// Pairs with [`get`](Self::get) and [`replace`](Self::replace) to put a
    /// previous binding back.
    pub fn store(&self, printer: Arc<BoxedPrinter>) -> Arc<BoxedPrinter> {
        let previous = self.current.swap(printer);
        tracing::debug!(slot = self.name, "printer replaced");
        previous
    }

    /// Rebind the platform-forwarding printer, returning the one it replaced.
    pub fn reset(&self) -> Arc<BoxedPrinter> {
        self.replace(LogPrinter::new())
    }
}

impl Printer for PrinterSlot {
    fn print(&self, line: &Line) {
        self.current.load().print(line)
    }
}

impl fmt::Debug for PrinterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterSlot")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

static DEFAULT_PRINTER: LazyLock<PrinterSlot> =
    LazyLock::new(|| PrinterSlot::new("default", LogPrinter::new()));

static DEFAULT_FATAL_PRINTER: LazyLock<PrinterSlot> =
    LazyLock::new(|| PrinterSlot::new("default-fatal", LogPrinter::new()));

/// Initialize both default slots.
///
/// Calling this is optional: the slots initialize themselves on first use
/// with the same defaults. Calling it more than once has no further effect.
pub fn init() {
    LazyLock::force(&DEFAULT_PRINTER);
    LazyLock::force(&DEFAULT_FATAL_PRINTER);
}

/// The slot used by normal-severity call sites.
pub fn default_printer() -> &'static PrinterSlot {
    &DEFAULT_PRINTER
}

/// The slot used by fatal and panic call sites.
pub fn default_fatal_printer() -> &'static PrinterSlot {
    &DEFAULT_FATAL_PRINTER
}

/// Replace the default printer, returning the previous one.
pub fn set_default_printer<P>(printer: P) -> Arc<BoxedPrinter>
where
    P: Printer + 'static,
{
    default_printer().replace(printer)
}

/// Replace the default fatal printer, returning the previous one.
pub fn set_default_fatal_printer<P>(printer: P) -> Arc<BoxedPrinter>
where
    P: Printer + 'static,
{
    default_fatal_printer().replace(printer)
}
