#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![no_std]

//! Value dumps as `tracing` events.
//!
//! # Quick Start
//!
//! ```
//! use tracing::Level;
//! use vardump::DumpStyle;
//! use vardump_tracing::{Dumped, dump_event};
//!
//! let ports = vec![8080_u16, 8443];
//!
//! // As a field of your own event
//! tracing::info!(ports = %Dumped::new(&ports), "listening");
//!
//! // As a standalone event on the `vardump` target
//! dump_event(Level::DEBUG, &ports);
//!
//! // With a multi-line style
//! tracing::debug!(ports = %Dumped::new(&ports).with_style(DumpStyle::PRINT));
//! ```
//!
//! To route [`vardump::print`] output through `tracing` instead of standard
//! error, install [`TracingSink`]:
//!
//! ```
//! use vardump::hooks::Hooks;
//! use vardump_tracing::TracingSink;
//!
//! Hooks::new()
//!     .print_sink(TracingSink)
//!     .install()
//!     .expect("failed to install hooks");
//! ```

use core::fmt;

use tracing::Level;
use vardump::{Dump, DumpStyle, hooks::PrintSink};

/// Target used by every event this crate emits.
pub const TARGET: &str = "vardump";

/// Formats a value with [`vardump::dump`] when displayed.
///
/// The trailing line break of the dump is left out. When the style enables
/// the diagram, its rows follow the value on separate lines.
#[derive(Clone)]
pub struct Dumped<'a> {
    value: &'a dyn Dump,
    style: DumpStyle,
}

impl<'a> Dumped<'a> {
    /// Wraps `value`, rendered with [`DumpStyle::DEFAULT`].
    #[must_use]
    pub fn new(value: &'a dyn Dump) -> Self {
        Self {
            value,
            style: DumpStyle::DEFAULT,
        }
    }

    /// Renders with `style` instead.
    #[must_use]
    pub fn with_style(mut self, style: DumpStyle) -> Self {
        self.style = style;
        self
    }
}

impl fmt::Display for Dumped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = vardump::dump(&self.style, &[self.value]);
        f.write_str(text.trim_end_matches('\n'))
    }
}

impl fmt::Debug for Dumped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Emits an event at `level` on the [`TARGET`] target, with the dump of
/// `value` in its `dump` field.
pub fn dump_event(level: Level, value: &dyn Dump) {
    let dump = Dumped::new(value);
    match level {
        Level::ERROR => tracing::error!(target: TARGET, dump = %dump),
        Level::WARN => tracing::warn!(target: TARGET, dump = %dump),
        Level::INFO => tracing::info!(target: TARGET, dump = %dump),
        Level::DEBUG => tracing::debug!(target: TARGET, dump = %dump),
        _ => tracing::trace!(target: TARGET, dump = %dump),
    }
}

/// A [`PrintSink`] forwarding each print block as a `DEBUG` event.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink;

impl PrintSink for TracingSink {
    fn write_print(&self, text: &str) {
        tracing::debug!(target: TARGET, "{}", text.trim_end_matches('\n'));
    }
}
