//! # klog
//!
//! A minimal structured-logging indirection layer.
//!
//! Log lines are key/value pairs ([`Line`]) handed to a [`Printer`]. Where a
//! line ends up is decided by whichever printer is bound to the two
//! process-wide slots in [`registry`]; by default both forward to
//! [`tracing`] as `<key> value`.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::sync::Arc;
//! use klog::testing::CapturePrinter;
//! use klog::{keyf, kprint, registry};
//!
//! let capture = Arc::new(CapturePrinter::new());
//! let previous = registry::set_default_printer(capture.clone());
//!
//! kprint(keyf!("request:%s", "abc"), 200);
//! assert!(capture.contains("request:abc", "200"));
//!
//! registry::default_printer().store(previous);
//! ```
//!
//! ## Silencing output
//!
//! ```rust
//! use klog::{registry, NilPrinter};
//!
//! let previous = registry::set_default_printer(NilPrinter);
//! klog::kprint("ignored", "value");
//! registry::default_printer().store(previous);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod key;
pub mod kprint;
pub mod line;
pub mod printer;
pub mod registry;
pub mod testing;

// Re-exports
pub use key::{keyf, Arg};
pub use kprint::{kfatal, kpanic, kprint};
pub use line::Line;
pub use printer::{
    log_printer, printer_fn, LogPrinter, NilPrinter, Printer, PrinterFunc, NIL_PRINTER,
};
pub use registry::{default_fatal_printer, default_printer, PrinterSlot};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::key::Arg;
    pub use crate::kprint::{kfatal, kpanic, kprint};
    pub use crate::line::Line;
    pub use crate::printer::{printer_fn, LogPrinter, NilPrinter, Printer, PrinterFunc};
    pub use crate::registry::{default_fatal_printer, default_printer, PrinterSlot};
    pub use crate::{keyf, kfatalf, kpanicf, kprintf};
}
