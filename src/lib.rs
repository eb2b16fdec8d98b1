#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    unsafe_code,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Deterministic, cycle-safe text dumps of in-memory values.
//!
//! ## Overview
//!
//! `vardump` renders a value graph as text. Every reference-like value is
//! expanded the first time it is reached; later occurrences of the same
//! address print the address instead, so cycles terminate and shared data
//! is easy to spot. An optional diagram drawn under the dump links each
//! repeated address back to the place it was first expanded.
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use vardump::DumpStyle;
//!
//! struct Node {
//!     value: i32,
//!     next: Option<Rc<RefCell<Node>>>,
//! }
//!
//! vardump::dump_struct!(Node { value, next });
//!
//! let node = Rc::new(RefCell::new(Node { value: 1, next: None }));
//! node.borrow_mut().next = Some(node.clone());
//!
//! let text = vardump::dump(&DumpStyle::DEFAULT.with_diagram(true), &[&node]);
//! let mut lines = text.lines();
//! let first = lines.next().unwrap();
//! assert!(first.starts_with('&'));
//! assert!(first.contains("Node{ value: 1, next: 0x"));
//! assert!(lines.next().unwrap().starts_with('└'));
//! # node.borrow_mut().next = None;
//! ```
//!
//! ## Describing values
//!
//! Values are described through the [`Dump`] trait. It is implemented for
//! primitives, strings, pointers, the standard collections, cells and locks.
//! Structs are covered with [`dump_struct!`] or a hand-written
//! implementation using [`Walker::debug_struct`]. Dynamically-typed values
//! go in a [`Dyn`], which prints `repeat` when an equal value was already
//! expanded.
//!
//! ## Layout
//!
//! [`DumpStyle`] controls line breaks, indentation, the diagram and field
//! filtering. Sequences and maps made only of simple values (numbers,
//! strings, booleans) always stay on one line.
//!
//! ## Features
//!
//! - `std`: implementations for `std` types, the `VARDUMP` environment
//!   variable ([`config`]) and standard error output.
//! - `backtrace`: [`stack`] capture and [`print`].
//!
//! For implementation details, see the [`vardump-internals`] crate.
//!
//! [`vardump-internals`]: vardump_internals

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

#[cfg(feature = "std")]
pub mod config;
mod dump;
pub mod hooks;
mod impls;
mod kind;
#[cfg(feature = "backtrace")]
mod print;
#[cfg(feature = "backtrace")]
pub mod stack;
mod style;
mod type_name;
mod walker;

#[cfg(feature = "backtrace")]
pub use self::print::{print, print_block, thread_id};
pub use self::{
    dump::{AnyValue, Dump, Dyn},
    kind::{Complex, Kind},
    style::{DiagramGlyphs, DumpStyle, FieldFilter},
    type_name::{qualified_name, type_label},
    walker::{MapWriter, SeqWriter, StructWriter, Walker, dump, dump_bytes, dump_into, render},
};
