//! The recursive renderer.
//!
//! A [`Walker`] owns the text of one root value and the identity tracker for
//! that value. [`Dump`] implementations drive it; the walker decides layout,
//! expands every pointer target once, and prints repeated pointers as their
//! address and repeated interfaces as `repeat`.

use alloc::{string::String, vec::Vec};
use core::{
    cell::Cell,
    fmt::{self, Write as _},
};

use vardump_internals::{diagram::render_diagram, tracker::IdentityTracker};

use crate::{AnyValue, Dump, DumpStyle};

/// The rendering state for one root value.
///
/// Walkers are created by [`dump`] and [`render`]; [`Dump`] implementations
/// only ever receive one by mutable reference.
pub struct Walker<'s> {
    buf: String,
    style: &'s DumpStyle,
    tracker: IdentityTracker<dyn AnyValue>,
    level: usize,
    // (bytes, chars) of `buf` already counted by `offset`.
    counted: Cell<(usize, usize)>,
}

impl<'s> Walker<'s> {
    fn new(style: &'s DumpStyle) -> Self {
        Self {
            buf: String::new(),
            style,
            tracker: IdentityTracker::new(),
            level: 1,
            counted: Cell::new((0, 0)),
        }
    }

    /// The style this walker renders with.
    #[must_use]
    pub fn style(&self) -> &DumpStyle {
        self.style
    }

    /// Current nesting level. The root value is at level 1.
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of characters written so far.
    ///
    /// Pointer records and diagram columns are measured in characters, so
    /// text before a reference may contain any UTF-8.
    #[must_use]
    pub fn offset(&self) -> usize {
        let (bytes, chars) = self.counted.get();
        let chars = chars + self.buf[bytes..].chars().count();
        self.counted.set((self.buf.len(), chars));
        chars
    }

    /// Whether a pointer to `address` was already expanded in this dump.
    #[must_use]
    pub fn has_seen_pointer(&self, address: usize) -> bool {
        self.tracker.pointers.contains(address)
    }

    /// Whether a value equal to `value` was already expanded as an interface
    /// in this dump.
    #[must_use]
    pub fn has_seen_interface(&self, value: &dyn AnyValue) -> bool {
        self.tracker
            .interfaces
            .contains_by(|seen| seen.dyn_eq(value))
    }

    fn visit(&mut self, value: &dyn Dump, level: usize) {
        let outer = core::mem::replace(&mut self.level, level);
        value.dump(self);
        self.level = outer;
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        // Writing into a `String` cannot fail.
        let _ = self.buf.write_fmt(args);
    }

    fn indent(&mut self, times: usize) {
        for _ in 0..times {
            self.buf.push_str(&self.style.indent_unit);
        }
    }

    /// Writes a boolean.
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push_str(if value { "true" } else { "false" });
    }

    /// Writes a number in its standard decimal form.
    pub fn write_number(&mut self, value: impl fmt::Display) {
        self.emit(format_args!("{value}"));
    }

    /// Writes text between double quotes.
    ///
    /// The content is not escaped: quotes and line breaks inside `value` are
    /// copied verbatim.
    pub fn write_str(&mut self, value: &str) {
        self.buf.push('"');
        self.buf.push_str(value);
        self.buf.push('"');
    }

    /// Writes a type descriptor and nothing else. Used for channels.
    pub fn write_type(&mut self, descriptor: &str) {
        self.buf.push_str(descriptor);
    }

    /// Writes a raw pointer as `descriptor(0xADDRESS)`.
    pub fn write_raw_pointer(&mut self, descriptor: &str, address: usize) {
        self.emit(format_args!("{descriptor}(0x{address:X})"));
    }

    /// Writes the literal `nil`.
    pub fn write_nil(&mut self) {
        self.buf.push_str("nil");
    }

    /// Writes the literal `invalid`.
    pub fn write_invalid(&mut self) {
        self.buf.push_str("invalid");
    }

    /// Writes the fallback literal `unknown`.
    pub fn write_unknown(&mut self) {
        self.buf.push_str("unknown");
    }

    /// Writes a non-null pointer.
    ///
    /// The first time `address` is met its target is expanded after a `&`,
    /// at the current nesting level. Later occurrences print the address as
    /// `0x` followed by uppercase hex digits and are remembered for the
    /// diagram.
    ///
    /// Zero-sized targets share one dangling address, so they are expanded
    /// every time and never tracked.
    pub fn write_pointer<T: ?Sized + Dump>(&mut self, address: usize, target: &T) {
        if core::mem::size_of_val(target) == 0 {
            self.buf.push('&');
            target.dump(self);
            return;
        }

        let offset = self.offset();
        if let Some(id) = self.tracker.pointers.find(address) {
            self.tracker.pointers.add_reference(id, offset);
            self.emit(format_args!("0x{address:X}"));
            return;
        }

        self.tracker.pointers.push(address, offset);
        self.buf.push('&');
        target.dump(self);
    }

    /// Writes a dynamically-typed value.
    ///
    /// `None` prints `nil`. A value equal to one already expanded in this
    /// dump prints `repeat`. Anything else is remembered and expanded one
    /// level deeper.
    pub fn write_interface(&mut self, value: Option<&dyn AnyValue>) {
        let Some(value) = value else {
            self.write_nil();
            return;
        };

        if self.has_seen_interface(value) {
            self.buf.push_str("repeat");
            return;
        }

        self.tracker.interfaces.push(value.clone_value());
        self.visit(value, self.level + 1);
    }

    /// Starts a struct named `name`.
    ///
    /// ```
    /// use vardump::{Dump, DumpStyle, Kind, Walker};
    ///
    /// struct Point {
    ///     x: i32,
    ///     y: i32,
    /// }
    ///
    /// impl Dump for Point {
    ///     fn kind(&self) -> Kind {
    ///         Kind::Struct
    ///     }
    ///
    ///     fn dump(&self, walker: &mut Walker<'_>) {
    ///         walker
    ///             .debug_struct("geo::Point")
    ///             .field("x", &self.x)
    ///             .field("y", &self.y)
    ///             .finish();
    ///     }
    /// }
    ///
    /// let text = vardump::render(&DumpStyle::DEFAULT, &Point { x: 1, y: 2 });
    /// assert_eq!(text, "geo::Point{ x: 1, y: 2, }");
    /// ```
    pub fn debug_struct<'w>(&'w mut self, name: &'w str) -> StructWriter<'w, 's> {
        self.buf.push_str(name);
        self.buf.push('{');
        let level = self.level;
        StructWriter {
            walker: self,
            name,
            level,
        }
    }

    /// Starts a sequence described by `descriptor`.
    pub fn debug_seq<'w>(&'w mut self, descriptor: &str) -> SeqWriter<'w, 's> {
        self.buf.push_str(descriptor);
        self.buf.push('{');
        let level = self.level;
        SeqWriter {
            layout: Layout::new(self, level),
        }
    }

    /// Starts a map described by `descriptor`.
    pub fn debug_map<'w>(&'w mut self, descriptor: &str) -> MapWriter<'w, 's> {
        self.buf.push_str(descriptor);
        self.buf.push('{');
        let level = self.level;
        MapWriter {
            layout: Layout::new(self, level),
        }
    }
}

impl fmt::Debug for Walker<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("offset", &self.offset())
            .field("level", &self.level)
            .field("tracker", &self.tracker)
            .finish()
    }
}

/// Builder for a struct, returned by [`Walker::debug_struct`].
#[must_use = "the struct is left open until `finish` is called"]
pub struct StructWriter<'w, 's> {
    walker: &'w mut Walker<'s>,
    name: &'w str,
    level: usize,
}

impl StructWriter<'_, '_> {
    /// Writes one field.
    ///
    /// When the style's field filter matches this struct and field, the
    /// literal `ignore` is printed instead of the value.
    pub fn field(self, name: &str, value: &dyn Dump) -> Self {
        let pretty = self.walker.style.pretty_format;
        if pretty {
            self.walker.buf.push('\n');
            self.walker.indent(self.level);
        } else {
            self.walker.buf.push(' ');
        }

        self.walker.buf.push_str(name);
        self.walker.buf.push_str(": ");

        let ignored = self
            .walker
            .style
            .field_filter
            .as_ref()
            .is_some_and(|filter| filter.is_ignored(self.name, name));
        if ignored {
            self.walker.buf.push_str("ignore");
        } else {
            self.walker.visit(value, self.level + 1);
        }

        self.walker.buf.push(',');
        self
    }

    /// Closes the struct.
    pub fn finish(self) {
        if self.walker.style.pretty_format {
            self.walker.buf.push('\n');
            self.walker.indent(self.level.saturating_sub(1));
        } else {
            self.walker.buf.push(' ');
        }
        self.walker.buf.push('}');
    }
}

/// Layout shared by sequences and maps.
///
/// Each entry goes on its own line in pretty mode unless it is simple. The
/// trailing comma after the last entry and the closing line break are only
/// written when some entry was not simple.
struct Layout<'w, 's> {
    walker: &'w mut Walker<'s>,
    level: usize,
    entries: usize,
    all_simple: bool,
}

impl<'w, 's> Layout<'w, 's> {
    fn new(walker: &'w mut Walker<'s>, level: usize) -> Self {
        Self {
            walker,
            level,
            entries: 0,
            all_simple: true,
        }
    }

    fn begin_entry(&mut self, simple: bool) {
        if self.entries > 0 {
            self.walker.buf.push(',');
        }
        self.entries += 1;
        self.all_simple &= simple;

        if self.walker.style.pretty_format && !simple {
            self.walker.buf.push('\n');
            self.walker.indent(self.level);
        } else {
            self.walker.buf.push(' ');
        }
    }

    fn finish(self) {
        if !self.all_simple {
            self.walker.buf.push(',');
        }
        if self.walker.style.pretty_format && !self.all_simple {
            self.walker.buf.push('\n');
            self.walker.indent(self.level.saturating_sub(1));
        } else {
            self.walker.buf.push(' ');
        }
        self.walker.buf.push('}');
    }
}

/// Builder for a sequence, returned by [`Walker::debug_seq`].
#[must_use = "the sequence is left open until `finish` is called"]
pub struct SeqWriter<'w, 's> {
    layout: Layout<'w, 's>,
}

impl SeqWriter<'_, '_> {
    /// Writes one element.
    pub fn entry(mut self, value: &dyn Dump) -> Self {
        let simple = value.is_simple(&*self.layout.walker);
        self.layout.begin_entry(simple);
        let level = self.layout.level + 1;
        self.layout.walker.visit(value, level);
        self
    }

    /// Writes every element of `values`.
    pub fn entries<'v, T, I>(mut self, values: I) -> Self
    where
        T: Dump + 'v,
        I: IntoIterator<Item = &'v T>,
    {
        for value in values {
            self = self.entry(value);
        }
        self
    }

    /// Closes the sequence.
    pub fn finish(self) {
        self.layout.finish();
    }
}

/// Builder for a map, returned by [`Walker::debug_map`].
#[must_use = "the map is left open until `finish` is called"]
pub struct MapWriter<'w, 's> {
    layout: Layout<'w, 's>,
}

impl MapWriter<'_, '_> {
    /// Writes one `key: value` pair.
    ///
    /// Only the value decides whether the pair counts as simple.
    pub fn entry(mut self, key: &dyn Dump, value: &dyn Dump) -> Self {
        let simple = value.is_simple(&*self.layout.walker);
        self.layout.begin_entry(simple);
        let level = self.layout.level + 1;
        self.layout.walker.visit(key, level);
        self.layout.walker.buf.push_str(": ");
        self.layout.walker.visit(value, level);
        self
    }

    /// Writes every pair of `entries`.
    pub fn entries<'v, K, V, I>(mut self, entries: I) -> Self
    where
        K: Dump + 'v,
        V: Dump + 'v,
        I: IntoIterator<Item = (&'v K, &'v V)>,
    {
        for (key, value) in entries {
            self = self.entry(key, value);
        }
        self
    }

    /// Closes the map.
    pub fn finish(self) {
        self.layout.finish();
    }
}

/// Renders `value` without the trailing line break or diagram.
///
/// ```
/// use vardump::DumpStyle;
///
/// assert_eq!(vardump::render(&DumpStyle::DEFAULT, &vec![3, 7, 11]), "[i32]{ 3, 7, 11 }");
/// ```
#[must_use]
pub fn render(style: &DumpStyle, value: &dyn Dump) -> String {
    let mut walker = Walker::new(style);
    walker.visit(value, 1);
    walker.buf
}

/// Renders every value in `values`, each followed by a line break.
///
/// Every value gets its own identity tracker: sharing is only detected
/// within one value, never across two of them. When the style enables
/// diagrams and a value referenced some pointer more than once, the diagram
/// rows are appended right after that value's line.
///
/// ```
/// use vardump::DumpStyle;
///
/// let text = vardump::dump(&DumpStyle::DEFAULT, &[&1_u8, &"two"]);
/// assert_eq!(text, "1\n\"two\"\n");
/// ```
#[must_use]
pub fn dump(style: &DumpStyle, values: &[&dyn Dump]) -> String {
    let mut out = String::new();
    for value in values {
        dump_into(style, *value, &mut out);
    }
    out
}

/// Like [`dump`], returning bytes.
#[must_use]
pub fn dump_bytes(style: &DumpStyle, values: &[&dyn Dump]) -> Vec<u8> {
    dump(style, values).into_bytes()
}

/// Renders one value, its line break and its diagram into `out`.
pub fn dump_into(style: &DumpStyle, value: &dyn Dump, out: &mut String) {
    let mut walker = Walker::new(style);
    walker.visit(value, 1);

    out.push_str(&walker.buf);
    out.push('\n');

    if style.enable_diagram && walker.tracker.pointers.any_referenced() {
        render_diagram(
            &walker.tracker.pointers,
            walker.offset() + 1,
            style.diagram_head_length,
            &style.diagram_glyphs,
            out,
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        borrow::Cow,
        boxed::Box,
        rc::Rc,
        string::{String, ToString},
        vec,
    };
    use core::cell::RefCell;

    use super::*;
    use crate::{Dyn, Kind};

    struct Point {
        x: i32,
        y: i32,
    }

    crate::dump_struct!(Point { x, y });

    #[derive(Default)]
    struct Node {
        value: i32,
        next: Option<Rc<RefCell<Node>>>,
    }

    crate::dump_struct!(Node { value, next });

    struct Tagged {
        label: &'static str,
        next: Option<Rc<RefCell<Tagged>>>,
    }

    crate::dump_struct!(Tagged { label, next });

    fn pretty() -> DumpStyle {
        DumpStyle {
            pretty_format: true,
            indent_unit: Cow::Borrowed("  "),
            ..DumpStyle::DEFAULT
        }
    }

    #[test]
    fn test_struct_compact() {
        let text = render(&DumpStyle::DEFAULT, &Point { x: 1, y: 2 });
        assert_eq!(text, "tests::Point{ x: 1, y: 2, }");
    }

    #[test]
    fn test_struct_pretty() {
        let text = render(&pretty(), &Point { x: 1, y: 2 });
        assert_eq!(text, "tests::Point{\n  x: 1,\n  y: 2,\n}");
    }

    #[test]
    fn test_simple_sequence_stays_on_one_line() {
        let text = render(&pretty(), &vec![3_i32, 7, 11]);
        assert_eq!(text, "[i32]{ 3, 7, 11 }");
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_empty_sequence() {
        let empty: Vec<u8> = Vec::new();
        assert_eq!(render(&DumpStyle::DEFAULT, &empty), "[u8]{ }");
    }

    #[test]
    fn test_nested_sequence_breaks_lines() {
        let points = vec![Point { x: 1, y: 2 }];
        let text = render(&pretty(), &points);
        assert_eq!(
            text,
            "[Point]{\n  tests::Point{\n    x: 1,\n    y: 2,\n  },\n}"
        );
    }

    #[test]
    fn test_nil_pointer() {
        let node = Node::default();
        let text = render(&DumpStyle::DEFAULT, &node);
        assert_eq!(text, "tests::Node{ value: 0, next: nil, }");
    }

    #[test]
    fn test_shared_pointer_prints_address() {
        let shared = Rc::new(5_i32);
        let pair = vec![shared.clone(), shared.clone()];
        let address = Rc::as_ptr(&shared).addr();
        let text = render(&DumpStyle::DEFAULT, &pair);
        assert_eq!(text, alloc::format!("[Rc<i32>]{{ &5, 0x{address:X}, }}"));
    }

    #[test]
    fn test_cycle_terminates() {
        let node = Rc::new(RefCell::new(Node {
            value: 1,
            next: None,
        }));
        node.borrow_mut().next = Some(node.clone());
        let address = Rc::as_ptr(&node).addr();

        let text = render(&DumpStyle::DEFAULT, &node);
        assert_eq!(
            text,
            alloc::format!("&tests::Node{{ value: 1, next: 0x{address:X}, }}")
        );

        node.borrow_mut().next = None;
    }

    #[test]
    fn test_diagram_single_row() {
        let node = Rc::new(RefCell::new(Node::default()));
        node.borrow_mut().next = Some(node.clone());
        let style = DumpStyle {
            enable_diagram: true,
            ..DumpStyle::DEFAULT
        };

        let out = dump(&style, &[&node]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let text = lines[0];
        let reference = text.find("0x").unwrap_or_default();
        let row: Vec<char> = lines[1].chars().collect();
        assert_eq!(row.len(), text.chars().count() + 1);
        assert_eq!(row[0], '└');
        assert_eq!(row[reference], '┘');
        assert!(row[1..reference].iter().all(|&c| c == '─'));
        assert!(row[reference + 1..].iter().all(|&c| c == ' '));

        node.borrow_mut().next = None;
    }

    #[test]
    fn test_diagram_columns_count_characters() {
        let node = Rc::new(RefCell::new(Tagged {
            label: "ééééé",
            next: None,
        }));
        node.borrow_mut().next = Some(node.clone());

        let out = dump(&DumpStyle::DEFAULT.with_diagram(true), &[&node]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let text: Vec<char> = lines[0].chars().collect();
        let row: Vec<char> = lines[1].chars().collect();
        let reference = text
            .windows(2)
            .position(|pair| pair == ['0', 'x'])
            .unwrap_or_default();
        assert_eq!(row.len(), text.len() + 1);
        assert_eq!(row[0], '└');
        assert_eq!(row[reference], '┘');

        node.borrow_mut().next = None;
    }

    #[test]
    fn test_borrowed_strings_are_not_pointers() {
        let text = render(&DumpStyle::PRINT, &vec!["a", "a"]);
        assert_eq!(text, "[&str]{ \"a\", \"a\" }");

        let owned = String::from("b");
        let text = render(&DumpStyle::DEFAULT, &vec![&owned, &owned]);
        assert_eq!(text, "[&String]{ \"b\", \"b\" }");
    }

    #[test]
    fn test_zero_sized_targets_are_not_shared() {
        let units = vec![Box::new(()), Box::new(())];
        assert_eq!(
            render(&DumpStyle::DEFAULT, &units),
            "[Box<()>]{ &invalid, &invalid, }"
        );

        let empty: Vec<Box<[u8]>> = vec![Box::from([0_u8; 0]), Box::from([0_u8; 0])];
        assert_eq!(
            render(&DumpStyle::DEFAULT, &empty),
            "[Box<[u8]>]{ &[u8]{ }, &[u8]{ }, }"
        );
    }

    #[test]
    fn test_diagram_disabled_by_default() {
        let node = Rc::new(RefCell::new(Node::default()));
        node.borrow_mut().next = Some(node.clone());
        let out = dump(&DumpStyle::DEFAULT, &[&node]);
        assert_eq!(out.lines().count(), 1);
        node.borrow_mut().next = None;
    }

    #[test]
    fn test_interface_repeat_within_one_value() {
        let values = vec![
            Dyn::new(String::from("a")),
            Dyn::new(String::from("b")),
            Dyn::new(String::from("a")),
        ];
        let text = render(&DumpStyle::DEFAULT, &values);
        assert_eq!(text, "[Dyn]{ \"a\", \"b\", repeat, }");
    }

    #[test]
    fn test_interface_history_is_per_value() {
        let a = Dyn::new(42_i64);
        let b = Dyn::new(42_i64);
        let out = dump(&DumpStyle::DEFAULT, &[&a, &b]);
        assert_eq!(out, "42\n42\n");
    }

    #[test]
    fn test_field_filter() {
        let style = DumpStyle::DEFAULT.with_field_filter(|ty: &str, field: &str| {
            ty == "tests::Point" && field == "y"
        });
        let text = render(&style, &Point { x: 3, y: 4 });
        assert_eq!(text, "tests::Point{ x: 3, y: ignore, }");
    }

    #[test]
    fn test_unknown_fallback() {
        struct Opaque;
        impl Dump for Opaque {}

        assert_eq!(Opaque.kind(), Kind::Unknown);
        assert_eq!(render(&DumpStyle::DEFAULT, &Opaque), "unknown");
        let boxed: Box<Opaque> = Box::new(Opaque);
        assert!(render(&DumpStyle::DEFAULT, &boxed).starts_with("&unknown"));
    }

    #[test]
    fn test_strings_are_not_escaped() {
        let text = render(&DumpStyle::DEFAULT, &"a\"b\nc".to_string());
        assert_eq!(text, "\"a\"b\nc\"");
    }
}
