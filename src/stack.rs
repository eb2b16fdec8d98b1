//! Call stack capture with deferred symbol resolution.
//!
//! [`StackTrace::capture`] only records instruction pointers, which stay
//! valid for the lifetime of the process. Names, files and lines are looked
//! up the first time [`StackTrace::frames`] is called.
//!
//! ```
//! use vardump::stack::StackTrace;
//!
//! let stack = StackTrace::capture(0);
//! assert!(!stack.is_empty());
//! for frame in stack.frames() {
//!     assert!(!frame.name.is_empty());
//! }
//! ```

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::{ffi::c_void, fmt, fmt::Write as _};
use std::sync::OnceLock;

/// One resolved level of a call stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Function name without its crate, with `.` between path segments.
    pub name: String,
    /// Source file.
    pub file: String,
    /// Source line, 0 when unknown.
    pub line: u32,
}

impl Frame {
    /// The frame used when an instruction pointer cannot be resolved.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            name: String::from("???"),
            file: String::from("???"),
            line: 0,
        }
    }

    /// Whether this is the [`unknown`](Self::unknown) frame.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.name == "???" && self.file == "???" && self.line == 0
    }

    fn resolve(ip: usize) -> Self {
        let mut frame = None;
        backtrace::resolve(ip as *mut c_void, |symbol| {
            if frame.is_some() {
                return;
            }
            let Some(name) = symbol.name() else {
                return;
            };
            frame = Some(Self {
                name: normalize_name(&format!("{name:#}")),
                file: symbol
                    .filename()
                    .map_or_else(|| String::from("???"), |path| path.display().to_string()),
                line: symbol.lineno().unwrap_or(0),
            });
        });
        frame.unwrap_or_else(Self::unknown)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}() [{}:{}]", self.name, self.file, self.line)
    }
}

/// Shortens a demangled symbol name.
///
/// Everything up to the last `/` is dropped, then the leading crate segment
/// of plain paths, and the remaining `::` separators become `.`.
///
/// ```
/// use vardump::stack::normalize_name;
///
/// assert_eq!(normalize_name("app::geometry::Point::area"), "geometry.Point.area");
/// assert_eq!(normalize_name("<app::Point as core::fmt::Debug>::fmt"), "<app.Point as core.fmt.Debug>.fmt");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let name = name.rsplit_once('/').map_or(name, |(_, rest)| rest);
    let name = if name.starts_with('<') {
        name
    } else {
        name.split_once("::").map_or(name, |(_, rest)| rest)
    };
    name.replace("::", ".")
}

/// The instruction pointers of a call stack, innermost first.
pub struct StackTrace {
    ips: Vec<usize>,
    frames: OnceLock<Vec<Frame>>,
}

impl StackTrace {
    /// Captures the stack of the calling thread.
    ///
    /// The first frame is the caller of `capture` when `skip` is 0; every
    /// increment of `skip` drops one more frame.
    #[inline(never)]
    #[must_use]
    pub fn capture(skip: usize) -> Self {
        let anchor = Self::capture as usize;
        let mut ips = Vec::new();
        let mut anchor_at = None;

        backtrace::trace(|frame| {
            if anchor_at.is_none() && frame.symbol_address() as usize == anchor {
                anchor_at = Some(ips.len());
            }
            ips.push(frame.ip() as usize);
            true
        });

        // Some unwinders cannot report symbol addresses; fall back to names.
        let anchor_at = anchor_at.or_else(|| {
            ips.iter()
                .position(|&ip| Frame::resolve(ip).name.ends_with("StackTrace.capture"))
        });

        let start = anchor_at.map_or(0, |index| index + 1) + skip;
        ips.drain(..start.min(ips.len()));

        Self {
            ips,
            frames: OnceLock::new(),
        }
    }

    /// The raw instruction pointers.
    #[must_use]
    pub fn ips(&self) -> &[usize] {
        &self.ips
    }

    /// Number of captured frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ips.len()
    }

    /// Whether no frame was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    /// The resolved frames, resolving them on first use.
    pub fn frames(&self) -> &[Frame] {
        self.frames
            .get_or_init(|| self.ips.iter().map(|&ip| Frame::resolve(ip)).collect())
    }

    /// One `at name() [file:line]` line per frame, each prefixed by `indent`.
    #[must_use]
    pub fn text(&self, indent: &str) -> String {
        let mut out = String::new();
        for frame in self.frames() {
            let _ = writeln!(out, "{indent}{frame}");
        }
        out
    }
}

impl fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackTrace")
            .field("len", &self.ips.len())
            .field("resolved", &self.frames.get().is_some())
            .finish()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text(""))
    }
}
