//! The closed set of value categories the walker dispatches on.

use core::fmt;

/// The category of a dumped value.
///
/// Every [`Dump`](crate::Dump) implementation reports one of these. The
/// category decides how the value is laid out inside its container and, for
/// pointers and interfaces, whether identity tracking applies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `true` or `false`.
    Bool,
    /// Signed integers of any width.
    Int,
    /// Unsigned integers of any width.
    Uint,
    /// Floating point numbers.
    Float,
    /// Complex numbers, see [`Complex`].
    Complex,
    /// Text, printed between double quotes.
    String,
    /// A reference-like value whose target is expanded once per dump.
    Pointer,
    /// A dynamically-typed value, see [`Dyn`](crate::Dyn).
    Interface,
    /// A record with named fields.
    Struct,
    /// Arrays, slices and other ordered collections.
    Sequence,
    /// Key-value collections.
    Map,
    /// Channel endpoints. Only their type is printed.
    Channel,
    /// Raw pointers. Printed as an address, never dereferenced.
    RawPointer,
    /// A value that cannot be represented, such as a locked mutex.
    Invalid,
    /// A type that implements [`Dump`](crate::Dump) without describing itself.
    Unknown,
}

impl Kind {
    /// Whether values of this category are always cheap to render inline.
    ///
    /// Sequences and maps whose elements are all simple are printed on one
    /// line, even in pretty mode.
    #[must_use]
    pub const fn is_always_simple(self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Int
                | Self::Uint
                | Self::Float
                | Self::Complex
                | Self::String
                | Self::Channel
                | Self::Invalid
        )
    }
}

/// A complex number.
///
/// The standard library has no complex type, so the crate ships this minimal
/// one to give the [`Kind::Complex`] category a concrete representation.
///
/// ```
/// use vardump::{Complex, DumpStyle};
///
/// let c = Complex { re: 1.5, im: -2.0 };
/// assert_eq!(vardump::render(&DumpStyle::DEFAULT, &c), "(1.5-2i)");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Complex<T> {
    /// Real part.
    pub re: T,
    /// Imaginary part.
    pub im: T,
}

impl<T: fmt::Display> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{:+}i)", self.re, self.im)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_simple_kinds() {
        assert!(Kind::Int.is_always_simple());
        assert!(Kind::Channel.is_always_simple());
        assert!(Kind::Invalid.is_always_simple());
        assert!(!Kind::Pointer.is_always_simple());
        assert!(!Kind::Interface.is_always_simple());
        assert!(!Kind::RawPointer.is_always_simple());
        assert!(!Kind::Unknown.is_always_simple());
    }

    #[test]
    fn test_complex_display() {
        assert_eq!(Complex { re: 1.0, im: 2.0 }.to_string(), "(1+2i)");
        assert_eq!(Complex { re: 0.5, im: -3.25 }.to_string(), "(0.5-3.25i)");
    }
}
