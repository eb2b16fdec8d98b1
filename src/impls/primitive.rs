use alloc::{borrow::Cow, string::String};

use crate::{Complex, Dump, Kind, Walker};

macro_rules! impl_number {
    ($kind:ident: $($ty:ty),* $(,)?) => {
        $(
            impl Dump for $ty {
                fn kind(&self) -> Kind {
                    Kind::$kind
                }

                fn dump(&self, walker: &mut Walker<'_>) {
                    walker.write_number(self);
                }

                fn static_kind() -> Option<Kind> {
                    Some(Kind::$kind)
                }
            }
        )*
    };
}

impl_number!(Int: i8, i16, i32, i64, i128, isize);
impl_number!(Uint: u8, u16, u32, u64, u128, usize);
impl_number!(Float: f32, f64);
impl_number!(Complex: Complex<f32>, Complex<f64>);

impl Dump for bool {
    fn kind(&self) -> Kind {
        Kind::Bool
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.write_bool(*self);
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::Bool)
    }
}

impl Dump for str {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.write_str(self);
    }
}

impl Dump for String {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.write_str(self);
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::String)
    }
}

impl Dump for Cow<'_, str> {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.write_str(self);
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::String)
    }
}

impl Dump for char {
    fn kind(&self) -> Kind {
        Kind::String
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.write_str(self.encode_utf8(&mut [0; 4]));
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::String)
    }
}

/// The unit value has no representation.
impl Dump for () {
    fn kind(&self) -> Kind {
        Kind::Invalid
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.write_invalid();
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use crate::{DumpStyle, render};

    use super::*;

    fn text(value: &dyn Dump) -> String {
        render(&DumpStyle::DEFAULT, value)
    }

    #[test]
    fn test_numbers() {
        assert_eq!(text(&-12_i8), "-12");
        assert_eq!(text(&u128::MAX), "340282366920938463463374607431768211455");
        assert_eq!(text(&2.5_f32), "2.5");
        assert_eq!(text(&1.0_f64), "1");
        assert_eq!(text(&Complex { re: 0.0_f32, im: 1.0 }), "(0+1i)");
    }

    #[test]
    fn test_text_like() {
        assert_eq!(text(&true), "true");
        assert_eq!(text(&'x'), "\"x\"");
        assert_eq!(text(&Cow::Borrowed("cow")), "\"cow\"");
        assert_eq!(text(&String::new()), "\"\"");
    }

    #[test]
    fn test_unit_is_invalid() {
        assert_eq!(text(&()), "invalid");
        assert_eq!(().kind(), Kind::Invalid);
    }
}
