//! [`Dump`](crate::Dump) implementations for types outside this crate.

mod cell;
mod collections;
mod pointer;
mod primitive;
#[cfg(feature = "std")]
mod sync;
