//! Identity tracking for a single dump.
//!
//! A dump must notice when it reaches a value it has already expanded, either
//! because the graph contains a cycle or because two parts of it share a
//! sub-structure. Two kinds of values are tracked:
//!
//! - Pointers are identified by the address of their target. Every pointer
//!   that gets expanded pushes a [`PointerRecord`] onto a [`PointerChain`];
//!   when the same address is met again the walker records the column of the
//!   repeated occurrence on the existing record instead of expanding it again.
//! - Dynamically-typed values are identified by structural equality. They are
//!   appended to an [`InterfaceLog`] which is scanned linearly.
//!
//! Lookups are linear. Dumps are developer-triggered and small, so a hash
//! index would only add bookkeeping.

use alloc::{boxed::Box, vec::Vec};

/// Index of a [`PointerRecord`] inside its [`PointerChain`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(
    /// Position in the arena.
    usize,
);

impl RecordId {
    /// Returns the position of the record in push order.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One expanded pointer and every later place where it was referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerRecord {
    /// Target address.
    address: usize,
    /// Buffer column of the first expansion.
    declared_at: usize,
    /// Buffer columns of later occurrences.
    references: Vec<usize>,
    /// Link to the previously pushed record.
    prev: Option<RecordId>,
}

impl PointerRecord {
    /// Address of the pointer's target.
    #[inline]
    pub fn address(&self) -> usize {
        self.address
    }

    /// Column at which the pointer's contents were first written.
    #[inline]
    pub fn declared_at(&self) -> usize {
        self.declared_at
    }

    /// Columns at which the address was printed again, in output order.
    #[inline]
    pub fn references(&self) -> &[usize] {
        &self.references
    }

    /// Whether the address was printed again after its declaration.
    #[inline]
    pub fn is_referenced(&self) -> bool {
        !self.references.is_empty()
    }

    /// The record that was pushed right before this one.
    #[inline]
    pub fn prev(&self) -> Option<RecordId> {
        self.prev
    }
}

/// Arena of [`PointerRecord`]s with index links from newest to oldest.
///
/// Records are never removed while a dump is running, so the arena only
/// grows. The chain is walked newest-first, matching the order in which a
/// repeated address is most likely to be found (the innermost enclosing
/// pointer).
#[derive(Debug, Default, Clone)]
pub struct PointerChain {
    /// Records in push order.
    records: Vec<PointerRecord>,
    /// Most recently pushed record.
    head: Option<RecordId>,
}

impl PointerChain {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            head: None,
        }
    }

    /// Number of records in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no pointer has been expanded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recently pushed record, if any.
    #[inline]
    pub fn head(&self) -> Option<RecordId> {
        self.head
    }

    /// Looks up a record by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was produced by a different chain.
    #[inline]
    pub fn get(&self, id: RecordId) -> &PointerRecord {
        &self.records[id.0]
    }

    /// Finds the record for `address`, searching newest-first.
    pub fn find(&self, address: usize) -> Option<RecordId> {
        self.iter()
            .find(|(_, record)| record.address == address)
            .map(|(id, _)| id)
    }

    /// Whether `address` belongs to a pointer that was already expanded.
    #[inline]
    pub fn contains(&self, address: usize) -> bool {
        self.find(address).is_some()
    }

    /// Pushes a record for a pointer whose contents start at `declared_at`.
    pub fn push(&mut self, address: usize, declared_at: usize) -> RecordId {
        let id = RecordId(self.records.len());
        self.records.push(PointerRecord {
            address,
            declared_at,
            references: Vec::new(),
            prev: self.head,
        });
        self.head = Some(id);
        id
    }

    /// Records that the pointer `id` was printed again at `offset`.
    ///
    /// Offsets must not go backwards: the buffer only grows while a dump is
    /// running, so every reference lies at or after the declaration.
    pub fn add_reference(&mut self, id: RecordId, offset: usize) {
        let record = &mut self.records[id.0];
        debug_assert!(record.declared_at <= offset);
        debug_assert!(record.references.last().is_none_or(|&last| last <= offset));
        record.references.push(offset);
    }

    /// Whether any pointer was printed more than once.
    pub fn any_referenced(&self) -> bool {
        self.records.iter().any(PointerRecord::is_referenced)
    }

    /// Iterates records newest-first by following the `prev` links.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            chain: self,
            next: self.head,
        }
    }
}

/// Newest-first iterator over a [`PointerChain`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// The chain being walked.
    chain: &'a PointerChain,
    /// Record to yield next.
    next: Option<RecordId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (RecordId, &'a PointerRecord);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let record = self.chain.get(id);
        self.next = record.prev;
        Some((id, record))
    }
}

/// Append-only log of dynamically-typed values that were already expanded.
///
/// Values are compared with a caller-supplied equality, since the log does
/// not know what kind of values it stores.
pub struct InterfaceLog<T: ?Sized> {
    /// Logged values in visiting order.
    entries: Vec<Box<T>>,
}

impl<T: ?Sized> InterfaceLog<T> {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of logged values.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any logged value satisfies `eq`.
    pub fn contains_by(&self, mut eq: impl FnMut(&T) -> bool) -> bool {
        self.entries.iter().any(|entry| eq(&**entry))
    }

    /// Appends a value.
    pub fn push(&mut self, value: Box<T>) {
        self.entries.push(value);
    }
}

impl<T: ?Sized> Default for InterfaceLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> core::fmt::Debug for InterfaceLog<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InterfaceLog")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// Everything one dump needs to remember about the values it has visited.
pub struct IdentityTracker<T: ?Sized> {
    /// Expanded pointers.
    pub pointers: PointerChain,
    /// Expanded dynamically-typed values.
    pub interfaces: InterfaceLog<T>,
}

impl<T: ?Sized> IdentityTracker<T> {
    /// Creates an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pointers: PointerChain::new(),
            interfaces: InterfaceLog::new(),
        }
    }
}

impl<T: ?Sized> Default for IdentityTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> core::fmt::Debug for IdentityTracker<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IdentityTracker")
            .field("pointers", &self.pointers)
            .field("interfaces", &self.interfaces)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_find_prefers_newest() {
        let mut chain = PointerChain::new();
        let first = chain.push(0x10, 0);
        let second = chain.push(0x20, 5);
        assert_eq!(chain.find(0x10), Some(first));
        assert_eq!(chain.find(0x20), Some(second));
        assert_eq!(chain.find(0x30), None);
        assert_eq!(chain.head(), Some(second));
        assert_eq!(chain.get(second).prev(), Some(first));
        assert_eq!(chain.get(first).prev(), None);
    }

    #[test]
    fn test_iter_is_newest_first() {
        let mut chain = PointerChain::new();
        chain.push(1, 0);
        chain.push(2, 1);
        chain.push(3, 2);
        let addresses: Vec<usize> = chain.iter().map(|(_, r)| r.address()).collect();
        assert_eq!(addresses, vec![3, 2, 1]);
    }

    #[test]
    fn test_references_accumulate() {
        let mut chain = PointerChain::new();
        let id = chain.push(0xAB, 3);
        assert!(!chain.any_referenced());
        chain.add_reference(id, 10);
        chain.add_reference(id, 20);
        assert!(chain.any_referenced());
        assert_eq!(chain.get(id).references(), &[10, 20]);
        assert_eq!(chain.get(id).declared_at(), 3);
    }

    #[test]
    fn test_interface_log() {
        let mut log: InterfaceLog<str> = InterfaceLog::new();
        assert!(!log.contains_by(|v| v == "a"));
        log.push(Box::from("a"));
        log.push(Box::from("b"));
        assert_eq!(log.len(), 2);
        assert!(log.contains_by(|v| v == "b"));
        assert!(!log.contains_by(|v| v == "c"));
    }
}
