//! Integration tests for the tracker and diagram of vardump-internals.

use vardump_internals::{
    diagram::{DiagramGlyphs, diagram_rows, render_diagram},
    tracker::{IdentityTracker, PointerChain},
};

static_assertions::assert_impl_all!(PointerChain: Send, Sync, Clone);
static_assertions::assert_impl_all!(DiagramGlyphs: Send, Sync, Copy);

fn rows(chain: &PointerChain, width: usize, glyphs: &DiagramGlyphs) -> Vec<String> {
    diagram_rows(chain, width, 0, glyphs)
        .into_iter()
        .map(|row| row.into_iter().collect())
        .collect()
}

#[test]
fn test_self_referencing_struct() {
    // &Node{ next: 0x10, }
    let text = "&Node{ next: 0x10, }";
    let mut chain = PointerChain::new();
    let id = chain.push(0x10, 0);
    chain.add_reference(id, text.find("0x").unwrap());

    let mut out = String::new();
    let count = render_diagram(&chain, text.len() + 1, 0, &DiagramGlyphs::UNICODE, &mut out);
    assert_eq!(count, 1);
    assert_eq!(out, "└────────────┘       \n");
    assert_eq!(out.chars().count(), text.len() + 2);
}

#[test]
fn test_two_shared_pointers_get_two_rows() {
    let mut chain = PointerChain::new();
    let outer = chain.push(0xA, 0);
    let inner = chain.push(0xB, 3);
    chain.add_reference(inner, 7);
    chain.add_reference(outer, 11);

    let rows = rows(&chain, 13, &DiagramGlyphs::ASCII);
    assert_eq!(rows, vec!["\\--|---|---/ ", "   \\---/     "]);
}

#[test]
fn test_crossing_marks_overlap() {
    // Two inner pointers are referenced at the same column; the second
    // vertical drawn there becomes a crossing.
    let mut chain = PointerChain::new();
    let outer = chain.push(0xA, 0);
    let middle = chain.push(0xB, 2);
    let inner = chain.push(0xC, 4);
    chain.add_reference(middle, 5);
    chain.add_reference(inner, 5);
    chain.add_reference(outer, 8);

    let rows = rows(&chain, 9, &DiagramGlyphs::UNICODE);
    assert_eq!(rows, vec!["└─│─│┼──┘", "  └─│┘   ", "    └┘   "]);
}

#[test]
fn test_repeated_address_accumulates_references() {
    let mut chain = PointerChain::new();
    let id = chain.push(0x40, 2);
    for offset in [5, 9, 14] {
        let found = chain.find(0x40).unwrap();
        assert_eq!(found, id);
        chain.add_reference(found, offset);
    }
    assert_eq!(chain.get(id).references(), &[5, 9, 14]);

    let rows = rows(&chain, 16, &DiagramGlyphs::UNICODE);
    assert_eq!(rows, vec!["  └──┴───┴────┘ "]);
}

#[test]
fn test_tracker_starts_empty() {
    let tracker: IdentityTracker<str> = IdentityTracker::default();
    assert!(tracker.pointers.is_empty());
    assert!(tracker.interfaces.is_empty());
    assert!(!tracker.pointers.any_referenced());
}

#[test]
fn test_interface_log_with_trait_objects() {
    use core::fmt::Debug;

    let mut tracker: IdentityTracker<dyn Debug> = IdentityTracker::new();
    tracker.interfaces.push(Box::new(5_i32));
    tracker.interfaces.push(Box::new("five"));
    assert_eq!(tracker.interfaces.len(), 2);
    assert!(tracker.interfaces.contains_by(|value| format!("{value:?}") == "\"five\""));
    assert!(!tracker.interfaces.contains_by(|value| format!("{value:?}") == "6"));
}
