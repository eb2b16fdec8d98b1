#![no_std]
#![forbid(
    missing_docs,
    unsafe_code,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_docs_in_private_items,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
//! Internal implementation crate for [`vardump`].
//!
//! # Overview
//!
//! This crate contains the bookkeeping that a single dump needs while it walks
//! a value graph, and the layout engine that turns that bookkeeping into the
//! connector diagram printed below a dump.
//!
//! **This crate is an implementation detail.** No semantic versioning guarantees
//! are provided. Users should depend on the [`vardump`] crate, not this one.
//!
//! # Architecture
//!
//! - **[`tracker`]**: Identity tracking for one dump
//!   - [`PointerChain`]: Arena of [`PointerRecord`]s linked newest-first by
//!     index, used to detect pointers that were already expanded
//!   - [`InterfaceLog`]: Append-only log of dynamically-typed values that were
//!     already expanded, searched with a caller-supplied equality
//!
//! - **[`diagram`]**: Connector rows drawn under a dump
//!   - [`render_diagram`]: Draws one row per shared pointer
//!   - [`DiagramGlyphs`]: The glyph set used for drawing
//!
//! Neither structure is shared between dumps: the walker creates a fresh
//! tracker for every root value and drops it when that value is done.
//!
//! [`vardump`]: https://docs.rs/vardump
//! [`PointerChain`]: tracker::PointerChain
//! [`PointerRecord`]: tracker::PointerRecord
//! [`InterfaceLog`]: tracker::InterfaceLog
//! [`render_diagram`]: diagram::render_diagram
//! [`DiagramGlyphs`]: diagram::DiagramGlyphs

extern crate alloc;

pub mod diagram;
pub mod tracker;
