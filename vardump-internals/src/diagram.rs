//! Connector diagrams linking a shared pointer to its later references.
//!
//! When a dump prints a pointer whose target was already expanded, it prints
//! the bare address instead. The diagram drawn below the dump makes those
//! links visible:
//!
//! ```text
//! &Node{ next: &Node{ next: 0x5581D2A0, }, }
//! └─────────────────────────┘
//! ```
//!
//! Every pointer that was referenced at least once gets its own row. Rows are
//! numbered in the order the pointers were expanded, so the outermost shared
//! pointer terminates on the first row and inner ones drop further down,
//! passing through the rows above them with vertical glyphs.

use alloc::{string::String, vec, vec::Vec};

use crate::tracker::{PointerChain, PointerRecord};

/// The glyphs used to draw a diagram.
///
/// # Examples
///
/// ```
/// use vardump_internals::diagram::DiagramGlyphs;
///
/// let glyphs = DiagramGlyphs {
///     horizontal: '=',
///     ..DiagramGlyphs::ASCII
/// };
/// assert_eq!(glyphs.terminator, '\\');
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagramGlyphs {
    /// Placed under the column where the pointer was declared, on the
    /// pointer's own row.
    pub terminator: char,
    /// Placed under every reference except the last one.
    pub branch: char,
    /// Placed under the last reference.
    pub closing_branch: char,
    /// Fills the gap between the declaration and the last reference.
    pub horizontal: char,
    /// Carries a pointer's columns through the rows above its own.
    pub vertical: char,
    /// Replaces a vertical glyph that lands on an occupied cell.
    pub crossing: char,
}

impl DiagramGlyphs {
    /// Box-drawing glyphs.
    pub const UNICODE: Self = Self {
        terminator: '└',
        branch: '┴',
        closing_branch: '┘',
        horizontal: '─',
        vertical: '│',
        crossing: '┼',
    };

    /// Glyphs that survive terminals without Unicode support.
    pub const ASCII: Self = Self {
        terminator: '\\',
        branch: '^',
        closing_branch: '/',
        horizontal: '-',
        vertical: '|',
        crossing: '+',
    };
}

impl Default for DiagramGlyphs {
    fn default() -> Self {
        Self::UNICODE
    }
}

/// Draws the diagram for `chain` and appends it to `out`.
///
/// `text_len` is the length in characters of the dumped text the columns
/// refer to and `head_len` is the padding reserved in front of it for a
/// label printed by the caller. Every row is `text_len + head_len` characters wide and is
/// followed by a line break.
///
/// Returns the number of rows written, which is zero when no pointer was
/// referenced more than once.
pub fn render_diagram(
    chain: &PointerChain,
    text_len: usize,
    head_len: usize,
    glyphs: &DiagramGlyphs,
    out: &mut String,
) -> usize {
    let rows = diagram_rows(chain, text_len, head_len, glyphs);
    for row in &rows {
        out.extend(row.iter());
        out.push('\n');
    }
    rows.len()
}

/// Computes the rows of the diagram without joining them.
pub fn diagram_rows(
    chain: &PointerChain,
    text_len: usize,
    head_len: usize,
    glyphs: &DiagramGlyphs,
) -> Vec<Vec<char>> {
    // Push order, so the newest record gets the highest id.
    let mut shared: Vec<&PointerRecord> = chain
        .iter()
        .map(|(_, record)| record)
        .filter(|record| record.is_referenced())
        .collect();
    shared.reverse();

    let width = text_len + head_len;
    let mut rows = Vec::with_capacity(shared.len());

    for row_index in 0..shared.len() {
        let mut row = vec![' '; width];

        // Newest first, which draws the pass-through columns of inner
        // pointers before the row's own connector.
        for (id, record) in shared.iter().enumerate().rev() {
            if id < row_index {
                continue;
            }

            let declared = record.declared_at() + head_len;
            if id == row_index {
                put(&mut row, declared, glyphs.terminator);

                let references = record.references();
                let mut furthest = record.declared_at();
                for (i, &offset) in references.iter().enumerate() {
                    let glyph = if i + 1 < references.len() {
                        glyphs.branch
                    } else {
                        glyphs.closing_branch
                    };
                    put(&mut row, offset + head_len, glyph);
                    furthest = offset;
                }

                for column in declared + 1..furthest + head_len {
                    if row.get(column) == Some(&' ') {
                        row[column] = glyphs.horizontal;
                    }
                }
            } else {
                put(&mut row, declared, glyphs.vertical);
                for &offset in record.references() {
                    let column = offset + head_len;
                    let glyph = if row.get(column) == Some(&' ') {
                        glyphs.vertical
                    } else {
                        glyphs.crossing
                    };
                    put(&mut row, column, glyph);
                }
            }
        }

        rows.push(row);
    }

    rows
}

/// Writes `glyph` at `column`, ignoring columns past the end of the row.
fn put(row: &mut [char], column: usize, glyph: char) {
    if let Some(cell) = row.get_mut(column) {
        *cell = glyph;
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_no_rows_without_references() {
        let mut chain = PointerChain::new();
        chain.push(0x10, 0);
        let mut out = String::new();
        assert_eq!(render_diagram(&chain, 8, 0, &DiagramGlyphs::UNICODE, &mut out), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_single_reference() {
        let mut chain = PointerChain::new();
        let id = chain.push(0x10, 1);
        chain.add_reference(id, 5);
        let mut out = String::new();
        let rows = render_diagram(&chain, 8, 0, &DiagramGlyphs::UNICODE, &mut out);
        assert_eq!(rows, 1);
        assert_eq!(out, " └───┘  \n");
    }

    #[test]
    fn test_head_len_shifts_columns() {
        let mut chain = PointerChain::new();
        let id = chain.push(0x10, 0);
        chain.add_reference(id, 2);
        let mut out = String::new();
        render_diagram(&chain, 4, 3, &DiagramGlyphs::ASCII, &mut out);
        assert_eq!(out, "   \\-/ \n");
    }

    #[test]
    fn test_intermediate_references_branch() {
        let mut chain = PointerChain::new();
        let id = chain.push(0x10, 0);
        chain.add_reference(id, 3);
        chain.add_reference(id, 6);
        let rows = diagram_rows(&chain, 7, 0, &DiagramGlyphs::UNICODE);
        let row: String = rows[0].iter().collect();
        assert_eq!(row, "└──┴──┘");
    }

    #[test]
    fn test_inner_pointer_passes_through() {
        let mut chain = PointerChain::new();
        let outer = chain.push(0x10, 0);
        let inner = chain.push(0x20, 2);
        chain.add_reference(inner, 6);
        chain.add_reference(outer, 8);
        let rows: alloc::vec::Vec<String> = diagram_rows(&chain, 10, 0, &DiagramGlyphs::UNICODE)
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "└─│───│─┘ ".to_string());
        assert_eq!(rows[1], "  └───┘   ".to_string());
    }

    #[test]
    fn test_unreferenced_records_do_not_take_rows() {
        let mut chain = PointerChain::new();
        chain.push(0x10, 0);
        let shared = chain.push(0x20, 1);
        chain.push(0x30, 2);
        chain.add_reference(shared, 4);
        let rows = diagram_rows(&chain, 5, 0, &DiagramGlyphs::UNICODE);
        assert_eq!(rows.len(), 1);
    }
}
