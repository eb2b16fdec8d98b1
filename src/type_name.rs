//! Short type descriptors derived from [`core::any::type_name`].

use alloc::string::String;

/// The name of `T` with every module qualifier removed.
///
/// Generic arguments are shortened as well, so
/// `alloc::collections::btree::map::BTreeMap<i32, alloc::string::String>`
/// becomes `BTreeMap<i32, String>`.
///
/// ```
/// use vardump::type_label;
///
/// assert_eq!(type_label::<Vec<Option<String>>>(), "Vec<Option<String>>");
/// assert_eq!(type_label::<*const u8>(), "*const u8");
/// ```
#[must_use]
pub fn type_label<T: ?Sized>() -> String {
    strip_paths(core::any::type_name::<T>())
}

/// Removes the module qualifiers of every path found in `name`.
pub(crate) fn strip_paths(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut path_start = 0;
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(path_start);
        } else if c.is_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push(c);
            path_start = out.len();
        }
    }

    out
}

/// The last two segments of a `::`-separated path.
///
/// Struct descriptors are printed as `module::Type`, keeping only the
/// innermost module.
///
/// ```
/// use vardump::qualified_name;
///
/// assert_eq!(qualified_name("app::geometry::Point"), "geometry::Point");
/// assert_eq!(qualified_name("Point"), "Point");
/// ```
#[must_use]
pub fn qualified_name(path: &str) -> &str {
    let Some(last) = path.rfind("::") else {
        return path;
    };
    match path[..last].rfind("::") {
        Some(previous) => &path[previous + 2..],
        None => path,
    }
}
