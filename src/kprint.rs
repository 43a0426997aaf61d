//! Severity call sites.
//!
//! `kprint` goes through [`default_printer`]; `kpanic` and `kfatal` go
//! through [`default_fatal_printer`] before unwinding or exiting.
//!
//! ```rust
//! use klog::{keyf, kprint, kprintf};
//!
//! kprint(keyf!("request:%s", "abc"), 200);
//! kprintf!("latency", "{}ms", 12);
//! ```

use std::fmt::Display;

use crate::line::Line;
use crate::printer::Printer;
use crate::registry::{default_fatal_printer, default_printer};

/// Print `<key> value` through the default printer.
pub fn kprint(key: impl Into<String>, value: impl Display) {
    default_printer().print(&Line::new(key, value.to_string()));
}

/// Print through the default fatal printer, then panic with the line.
pub fn kpanic(key: impl Into<String>, value: impl Display) -> ! {
    let line = Line::new(key, value.to_string());
    default_fatal_printer().print(&line);
    panic!("{}", line)
}

/// Print through the default fatal printer, then exit with status 1.
///
/// Destructors do not run. Prefer [`kpanic`] where unwinding is acceptable.
pub fn kfatal(key: impl Into<String>, value: impl Display) -> ! {
    default_fatal_printer().print(&Line::new(key, value.to_string()));
    std::process::exit(1)
}

/// [`kprint`] with a `format!`-style value.
#[macro_export]
macro_rules! kprintf {
    ($key:expr, $($arg:tt)+) => {
        $crate::kprint($key, ::std::format!($($arg)+))
    };
}

/// [`kpanic`] with a `format!`-style value.
#[macro_export]
macro_rules! kpanicf {
    ($key:expr, $($arg:tt)+) => {
        $crate::kpanic($key, ::std::format!($($arg)+))
    };
}

/// [`kfatal`] with a `format!`-style value.
#[macro_export]
macro_rules! kfatalf {
    ($key:expr, $($arg:tt)+) => {
        $crate::kfatal($key, ::std::format!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    // Unit tests never rebind the global slots; see tests/routing.rs.

    #[test]
    #[traced_test]
    fn kprint_reaches_platform_logger_by_default() {
        kprint("user_id", 42);
        assert!(logs_contain("<user_id> 42"));
    }

    #[test]
    #[traced_test]
    fn kprintf_formats_value() {
        kprintf!("elapsed", "{}ms/{}", 12, "req");
        assert!(logs_contain("<elapsed> 12ms/req"));
    }

    #[test]
    #[should_panic(expected = "<invariant> broken")]
    fn kpanic_panics_with_line() {
        kpanic("invariant", "broken");
    }

    #[test]
    #[should_panic(expected = "<shard> 3 of 2")]
    fn kpanicf_formats_value() {
        kpanicf!("shard", "{} of {}", 3, 2);
    }
}
