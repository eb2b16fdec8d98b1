//! Dump values together with the current thread and call stack.

use alloc::string::String;

use crate::{Dump, DumpStyle, dump_into, hooks, stack::StackTrace};

/// Writes a debug block for `values` to the installed print sink.
///
/// The block reads:
///
/// ```text
/// [DEBUG PRINT]
/// <one dump per value>
/// by thread <id>
/// at <caller>() [<file>:<line>]
/// ...
/// ```
///
/// The style is [`DumpStyle::installed`] and the sink is standard error
/// unless another one was installed through [`Hooks`](crate::hooks::Hooks).
#[inline(never)]
pub fn print(values: &[&dyn Dump]) {
    let stack = StackTrace::capture(1);
    let text = print_block(&DumpStyle::installed(), values, &stack);
    hooks::with_print_sink(|sink| sink.write_print(&text));
}

/// Formats the block written by [`print`].
#[must_use]
pub fn print_block(style: &DumpStyle, values: &[&dyn Dump], stack: &StackTrace) -> String {
    let mut out = String::from("[DEBUG PRINT]\n");
    for value in values {
        dump_into(style, *value, &mut out);
    }
    out.push_str("by thread ");
    out.push_str(&thread_id());
    out.push('\n');
    out.push_str(&stack.text(""));
    out
}

/// The numeric identifier of the current thread.
///
/// ```
/// let id = vardump::thread_id();
/// assert!(!id.is_empty());
/// assert!(id.chars().all(|c| c.is_ascii_digit()));
/// ```
#[must_use]
pub fn thread_id() -> String {
    let debug = alloc::format!("{:?}", std::thread::current().id());
    debug.chars().filter(char::is_ascii_digit).collect()
}
