//! Demonstrates routing key/value lines through the default printer slots
//!
//! Run with: cargo run --example routing

use klog::prelude::*;
use klog::registry;

fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    registry::init();

    // Default: forwarded to tracing as `<key> value`
    kprint(keyf!("request:%s", "abc"), 200);
    kprintf!("latency", "{}ms", 12);

    // Route normal output through a custom printer
    let previous = registry::set_default_printer(printer_fn(|line: &Line| {
        println!("custom {} = {}", line.key, line.value);
    }));
    kprint(keyf!("shard-%03d", 7), "rebalanced");

    // Silence it, then put the platform logger back
    registry::set_default_printer(NilPrinter);
    kprint("dropped", "never shown");
    default_printer().store(previous);

    // Fatal output is independent and can go somewhere louder
    registry::set_default_fatal_printer(LogPrinter::with_level(tracing::Level::ERROR));
    kprint("normal", "still at INFO");
    default_fatal_printer().print(&Line::new("fatal", "would precede kpanic"));

    // Format mismatches never fail, they show up inline
    kprint(keyf!("count:%d", "notanumber"), "see key");
}
