/// Implements [`Dump`](crate::Dump) for a struct by listing its fields
///
/// The struct is rendered as `module::Type{ field: value, ... }`, where
/// `module` is the innermost module the macro is invoked in. Generic
/// parameters may be listed after the type name; each of them must
/// implement `Dump`.
///
/// # Examples
///
/// ```
/// mod geometry {
///     pub struct Point {
///         pub x: i32,
///         pub y: i32,
///     }
///
///     vardump::dump_struct!(Point { x, y });
///
///     pub struct Labeled<T> {
///         pub label: &'static str,
///         pub value: T,
///     }
///
///     vardump::dump_struct!(Labeled<T> { label, value });
/// }
///
/// use geometry::{Labeled, Point};
/// use vardump::DumpStyle;
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(vardump::render(&DumpStyle::DEFAULT, &point), "geometry::Point{ x: 1, y: 2, }");
///
/// let labeled = Labeled { label: "n", value: 3_u8 };
/// assert_eq!(
///     vardump::render(&DumpStyle::DEFAULT, &labeled),
///     "geometry::Labeled{ label: \"n\", value: 3, }"
/// );
/// ```
#[macro_export]
macro_rules! dump_struct {
    ($ty:ident $(< $($param:ident),+ $(,)? >)? { $($field:ident),* $(,)? }) => {
        impl $(< $($param: $crate::Dump),+ >)? $crate::Dump for $ty $(< $($param),+ >)? {
            fn kind(&self) -> $crate::Kind {
                $crate::Kind::Struct
            }

            fn dump(&self, walker: &mut $crate::Walker<'_>) {
                walker
                    .debug_struct($crate::qualified_name(::core::concat!(
                        ::core::module_path!(),
                        "::",
                        ::core::stringify!($ty)
                    )))
                    $(.field(::core::stringify!($field), &self.$field))*
                    .finish();
            }

            fn static_kind() -> ::core::option::Option<$crate::Kind> {
                ::core::option::Option::Some($crate::Kind::Struct)
            }
        }
    };
}

/// Dumps any number of values with a style
///
/// Shorthand for [`dump`](crate::dump) that takes the values directly
/// instead of a slice of trait objects.
///
/// ```
/// use vardump::DumpStyle;
///
/// let text = vardump::dump!(&DumpStyle::DEFAULT, 1_u8, "two", vec![3_i64]);
/// assert_eq!(text, "1\n\"two\"\n[i64]{ 3 }\n");
/// ```
#[macro_export]
macro_rules! dump {
    ($style:expr $(, $value:expr)* $(,)?) => {
        $crate::dump($style, &[$(&$value as &dyn $crate::Dump),*])
    };
}

/// Prints values with the current thread and call stack
///
/// Shorthand for [`print`](crate::print).
///
/// ```
/// let answer = 42;
/// vardump::dprint!(answer, "label");
/// ```
#[cfg(feature = "backtrace")]
#[macro_export]
macro_rules! dprint {
    ($($value:expr),* $(,)?) => {
        $crate::print(&[$(&$value as &dyn $crate::Dump),*])
    };
}
