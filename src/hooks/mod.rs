//! Process-wide defaults for [`print`](crate::print).
//!
//! # Quick Start
//!
//! ```rust
//! use vardump::{DumpStyle, hooks::Hooks};
//!
//! Hooks::new()
//!     .style(DumpStyle::PRINT.with_diagram(true))
//!     .print_sink(|text: &str| eprint!("{text}"))
//!     .install()
//!     .expect("failed to install hooks");
//! ```
//!
//! Without hooks, `print` reads its style from the `VARDUMP` environment
//! variable and writes to standard error.

mod hook_lock;

use alloc::boxed::Box;
use core::fmt;

use self::hook_lock::HookLock;
use crate::DumpStyle;

static HOOKS: HookLock<HookData> = HookLock::new();

/// Receives the text produced by [`print`](crate::print).
///
/// Any `Fn(&str)` closure is a sink.
pub trait PrintSink: Send + Sync + 'static {
    /// Writes one complete print block. Failures are ignored.
    fn write_print(&self, text: &str);
}

impl<F> PrintSink for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn write_print(&self, text: &str) {
        self(text);
    }
}

/// The default sink, writing to standard error.
#[cfg(feature = "std")]
#[derive(Copy, Clone, Debug, Default)]
pub struct StderrSink;

#[cfg(feature = "std")]
impl PrintSink for StderrSink {
    fn write_print(&self, text: &str) {
        use std::io::Write as _;

        let _ = std::io::stderr().lock().write_all(text.as_bytes());
    }
}

/// Builder for the global defaults.
///
/// # Examples
///
/// ```rust
/// use vardump::{DumpStyle, hooks::Hooks};
///
/// Hooks::new().style(DumpStyle::DEFAULT).install().expect("failed to install hooks");
///
/// // A second installation is rejected and hands the hooks back.
/// let rejected = Hooks::new().install().unwrap_err();
/// let _previous = rejected.0.replace();
/// ```
#[derive(Default)]
pub struct Hooks(HookData);

#[derive(Default)]
struct HookData {
    style: Option<DumpStyle>,
    print_sink: Option<Box<dyn PrintSink>>,
}

/// Error returned when attempting to install hooks when they're already
/// installed.
///
/// Contains the hooks that were attempted to be installed.
pub struct HooksAlreadyInstalledError(pub Hooks);

impl fmt::Debug for HooksAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HooksAlreadyInstalledError").finish()
    }
}

impl fmt::Display for HooksAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hooks are already installed globally")
    }
}

impl core::error::Error for HooksAlreadyInstalledError {}

impl Hooks {
    /// Creates an empty builder. Unset parts fall back to the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style used by [`print`](crate::print).
    #[must_use]
    pub fn style(mut self, style: DumpStyle) -> Self {
        self.0.style = Some(style);
        self
    }

    /// Sets where [`print`](crate::print) writes.
    #[must_use]
    pub fn print_sink<S: PrintSink>(mut self, sink: S) -> Self {
        self.0.print_sink = Some(Box::new(sink));
        self
    }

    /// Installs the hooks globally.
    ///
    /// If hooks are already installed, returns an error
    /// [`HooksAlreadyInstalledError`], containing the hooks that were attempted
    /// to be installed.
    pub fn install(self) -> Result<(), HooksAlreadyInstalledError> {
        HOOKS
            .install(self.0)
            .map_err(|data| HooksAlreadyInstalledError(Self(data)))
    }

    /// Replaces the currently installed hooks with `self` and returns the
    /// previous ones.
    pub fn replace(self) -> Option<Self> {
        HOOKS.replace(Some(self.0)).map(Self)
    }

    /// Removes the installed hooks, restoring the defaults.
    pub fn uninstall() -> Option<Self> {
        HOOKS.replace(None).map(Self)
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("style", &self.0.style)
            .field("print_sink", &self.0.print_sink.as_ref().map(|_| ..))
            .finish()
    }
}

/// The installed style, if any.
pub(crate) fn installed_style() -> Option<DumpStyle> {
    HOOKS.with(|hooks| hooks.and_then(|hooks| hooks.style.clone()))
}

/// Calls `f` with the installed sink, or with [`StderrSink`] when none is
/// installed.
#[cfg(feature = "backtrace")]
pub(crate) fn with_print_sink<R>(f: impl FnOnce(&dyn PrintSink) -> R) -> R {
    HOOKS.with(|hooks| match hooks.and_then(|hooks| hooks.print_sink.as_deref()) {
        Some(sink) => f(sink),
        None => f(&StderrSink),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(Hooks: Send, Sync);
    static_assertions::assert_impl_all!(HooksAlreadyInstalledError: Send, Sync);

    // Every assertion on the global slot lives in this single test, so
    // parallel tests cannot observe each other's hooks.
    #[test]
    fn test_install_replace_uninstall() {
        let _ = Hooks::uninstall();
        assert!(installed_style().is_none());

        Hooks::new()
            .style(DumpStyle::DEFAULT.with_head_length(4))
            .install()
            .expect("first install succeeds");
        assert_eq!(installed_style().map(|s| s.diagram_head_length), Some(4));

        let rejected = Hooks::new().style(DumpStyle::PRINT).install();
        assert!(rejected.is_err());
        assert_eq!(installed_style().map(|s| s.diagram_head_length), Some(4));

        let previous = Hooks::new().style(DumpStyle::PRINT).replace();
        assert!(previous.is_some());
        assert_eq!(installed_style().map(|s| s.pretty_format), Some(true));

        assert!(Hooks::uninstall().is_some());
        assert!(installed_style().is_none());
    }
}
