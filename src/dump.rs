//! The [`Dump`] trait and the dynamically-typed [`Dyn`] wrapper.

use alloc::boxed::Box;
use core::{any::Any, fmt};

use crate::{Kind, walker::Walker};

/// A value the walker knows how to render.
///
/// Implementations describe their value by calling one of the `write_*`
/// methods or one of the builders ([`Walker::debug_struct`],
/// [`Walker::debug_seq`], [`Walker::debug_map`]) on the [`Walker`]. The
/// walker takes care of layout, cycle detection and sharing.
///
/// Implementations are provided for primitives, strings, pointers, standard
/// collections and cells. User structs are most easily covered with the
/// [`dump_struct!`](crate::dump_struct) macro.
///
/// A type may also implement the trait with an empty body. It then renders
/// as the `unknown` fallback literal instead of failing.
///
/// # Examples
///
/// ```
/// use vardump::{Dump, DumpStyle, Kind, Walker};
///
/// struct Celsius(f64);
///
/// impl Dump for Celsius {
///     fn kind(&self) -> Kind {
///         Kind::Float
///     }
///
///     fn dump(&self, walker: &mut Walker<'_>) {
///         walker.write_number(self.0);
///     }
/// }
///
/// assert_eq!(vardump::render(&DumpStyle::DEFAULT, &Celsius(21.5)), "21.5");
/// ```
pub trait Dump {
    /// The category of this value.
    fn kind(&self) -> Kind {
        Kind::Unknown
    }

    /// Renders this value through `walker`.
    fn dump(&self, walker: &mut Walker<'_>) {
        walker.write_unknown();
    }

    /// Whether this value is cheap enough to render inline inside a sequence
    /// or map.
    ///
    /// The answer may depend on what the walker has already seen, which is
    /// why it receives the walker.
    fn is_simple(&self, walker: &Walker<'_>) -> bool {
        let _ = walker;
        self.kind().is_always_simple()
    }

    /// The category shared by every value of this type, if there is one.
    ///
    /// Used to classify raw pointers without dereferencing them.
    fn static_kind() -> Option<Kind>
    where
        Self: Sized,
    {
        None
    }
}

/// A [`Dump`] value whose concrete type is erased.
///
/// This is what [`Dyn`] stores. The blanket implementation covers every
/// `'static` type that is [`Dump`], [`PartialEq`] and [`Clone`]; equality is
/// used to detect a dynamically-typed value that was already expanded, and
/// cloning lets the dump remember it after the original borrow ends.
pub trait AnyValue: Dump + Any {
    /// Upcasts to [`Any`].
    fn as_any(&self) -> &dyn Any;

    /// Deep structural equality across erased types.
    ///
    /// Values of different concrete types are never equal.
    fn dyn_eq(&self, other: &dyn AnyValue) -> bool;

    /// Clones the value into a new box.
    fn clone_value(&self) -> Box<dyn AnyValue>;
}

impl<T> AnyValue for T
where
    T: Dump + PartialEq + Clone + Any,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn AnyValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn clone_value(&self) -> Box<dyn AnyValue> {
        Box::new(self.clone())
    }
}

/// A dynamically-typed value that may be absent.
///
/// Rendering a `Dyn` expands its content one nesting level deeper. When a
/// structurally equal value was already expanded earlier in the same dump,
/// the literal `repeat` is printed instead.
///
/// # Examples
///
/// ```
/// use vardump::{Dyn, DumpStyle};
///
/// let values = vec![Dyn::new(7_u8), Dyn::new(7_u8), Dyn::nil()];
/// assert_eq!(
///     vardump::render(&DumpStyle::DEFAULT, &values),
///     "[Dyn]{ 7, repeat, nil, }"
/// );
/// ```
pub struct Dyn(Option<Box<dyn AnyValue>>);

impl Dyn {
    /// Wraps `value`.
    pub fn new<T: AnyValue>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// The absent value.
    #[must_use]
    pub const fn nil() -> Self {
        Self(None)
    }

    /// Whether no value is wrapped.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_none()
    }

    /// The wrapped value.
    #[must_use]
    pub fn get(&self) -> Option<&dyn AnyValue> {
        self.0.as_deref()
    }

    /// Attempts to view the wrapped value as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.get()?.as_any().downcast_ref()
    }
}

impl Default for Dyn {
    fn default() -> Self {
        Self::nil()
    }
}

impl Clone for Dyn {
    fn clone(&self) -> Self {
        Self(self.get().map(AnyValue::clone_value))
    }
}

impl PartialEq for Dyn {
    fn eq(&self, other: &Self) -> bool {
        match (self.get(), other.get()) {
            (None, None) => true,
            (Some(a), Some(b)) => a.dyn_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Dyn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            None => f.write_str("Dyn(nil)"),
            Some(value) => f.debug_tuple("Dyn").field(&value.as_any().type_id()).finish(),
        }
    }
}

impl Dump for Dyn {
    fn kind(&self) -> Kind {
        Kind::Interface
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.write_interface(self.get());
    }

    fn is_simple(&self, walker: &Walker<'_>) -> bool {
        self.get().is_some_and(|value| walker.has_seen_interface(value))
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::Interface)
    }
}
