//! Rendering options.

use alloc::borrow::Cow;
use core::fmt;

use triomphe::Arc;
use unsize::CoerceUnsize;
pub use vardump_internals::diagram::DiagramGlyphs;

/// Decides which struct fields are hidden.
///
/// Hidden fields print the literal `ignore` instead of their value. Any
/// `Fn(&str, &str) -> bool` closure is a filter; it receives the struct's
/// qualified name (`module::Type`) and the field name.
pub trait FieldFilter: Send + Sync + 'static {
    /// Whether `field` of the struct `type_name` should be hidden.
    fn is_ignored(&self, type_name: &str, field: &str) -> bool;
}

impl<F> FieldFilter for F
where
    F: Fn(&str, &str) -> bool + Send + Sync + 'static,
{
    fn is_ignored(&self, type_name: &str, field: &str) -> bool {
        self(type_name, field)
    }
}

/// How values are laid out.
///
/// Two presets are provided: [`DumpStyle::DEFAULT`] prints everything on one
/// line, [`DumpStyle::PRINT`] breaks lines and indents with two spaces.
///
/// # Examples
///
/// ```
/// use vardump::{DiagramGlyphs, DumpStyle};
///
/// let style = DumpStyle::PRINT
///     .with_diagram(true)
///     .with_glyphs(DiagramGlyphs::ASCII)
///     .with_field_filter(|_: &str, field: &str| field == "password");
/// assert!(style.pretty_format);
/// assert!(style.field_filter.is_some());
/// ```
#[derive(Clone)]
pub struct DumpStyle {
    /// Columns reserved in front of every diagram row.
    pub diagram_head_length: usize,
    /// Whether a diagram of shared pointers is printed below each value.
    pub enable_diagram: bool,
    /// Whether composite values are broken over several indented lines.
    pub pretty_format: bool,
    /// Repeated once per nesting level when `pretty_format` is set.
    pub indent_unit: Cow<'static, str>,
    /// Hides struct fields, see [`FieldFilter`].
    pub field_filter: Option<Arc<dyn FieldFilter>>,
    /// Glyphs used by the diagram.
    pub diagram_glyphs: DiagramGlyphs,
}

impl DumpStyle {
    /// Single line output with no diagram.
    pub const DEFAULT: Self = Self {
        diagram_head_length: 0,
        enable_diagram: false,
        pretty_format: false,
        indent_unit: Cow::Borrowed(""),
        field_filter: None,
        diagram_glyphs: DiagramGlyphs::UNICODE,
    };

    /// Multi-line output indented with two spaces.
    pub const PRINT: Self = Self {
        diagram_head_length: 0,
        enable_diagram: false,
        pretty_format: true,
        indent_unit: Cow::Borrowed("  "),
        field_filter: None,
        diagram_glyphs: DiagramGlyphs::UNICODE,
    };

    /// Sets `enable_diagram`.
    #[must_use]
    pub fn with_diagram(mut self, enable: bool) -> Self {
        self.enable_diagram = enable;
        self
    }

    /// Sets `diagram_head_length`.
    #[must_use]
    pub fn with_head_length(mut self, columns: usize) -> Self {
        self.diagram_head_length = columns;
        self
    }

    /// Sets `pretty_format` and `indent_unit` together.
    #[must_use]
    pub fn with_pretty(mut self, indent_unit: impl Into<Cow<'static, str>>) -> Self {
        self.pretty_format = true;
        self.indent_unit = indent_unit.into();
        self
    }

    /// Sets `diagram_glyphs`.
    #[must_use]
    pub fn with_glyphs(mut self, glyphs: DiagramGlyphs) -> Self {
        self.diagram_glyphs = glyphs;
        self
    }

    /// Sets the field filter.
    #[must_use]
    pub fn with_field_filter<F: FieldFilter>(mut self, filter: F) -> Self {
        self.field_filter = Some(Arc::new(filter).unsize(unsize::Coercion!(to dyn FieldFilter)));
        self
    }

    /// The style used by [`print`](crate::print).
    ///
    /// This is the style installed through [`Hooks`](crate::hooks::Hooks)
    /// if any. Otherwise it is read from the `VARDUMP` environment variable
    /// when the `std` feature is enabled, and [`DumpStyle::PRINT`] without
    /// it.
    #[must_use]
    pub fn installed() -> Self {
        if let Some(style) = crate::hooks::installed_style() {
            return style;
        }

        #[cfg(feature = "std")]
        {
            Self::from_env()
        }

        #[cfg(not(feature = "std"))]
        {
            Self::PRINT
        }
    }
}

impl Default for DumpStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for DumpStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DumpStyle")
            .field("diagram_head_length", &self.diagram_head_length)
            .field("enable_diagram", &self.enable_diagram)
            .field("pretty_format", &self.pretty_format)
            .field("indent_unit", &self.indent_unit)
            .field("field_filter", &self.field_filter.as_ref().map(|_| ..))
            .field("diagram_glyphs", &self.diagram_glyphs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(DumpStyle: Send, Sync, Clone);

    #[test]
    fn test_presets() {
        assert!(!DumpStyle::DEFAULT.pretty_format);
        assert!(!DumpStyle::DEFAULT.enable_diagram);
        assert!(DumpStyle::PRINT.pretty_format);
        assert_eq!(DumpStyle::PRINT.indent_unit, "  ");
        assert_eq!(DumpStyle::PRINT.diagram_head_length, 0);
    }

    #[test]
    fn test_closure_filter() {
        let style = DumpStyle::DEFAULT.with_field_filter(|ty: &str, field: &str| {
            ty.ends_with("User") && field == "token"
        });
        let filter = style.field_filter.as_ref().map(|f| f.is_ignored("auth::User", "token"));
        assert_eq!(filter, Some(true));
    }
}
