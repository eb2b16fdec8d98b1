use alloc::{
    boxed::Box,
    rc::{self, Rc},
    sync::{self, Arc},
};
use core::ptr::NonNull;

use crate::{Dump, Kind, Walker, type_label};

/// The address `value` points to, without its metadata.
fn address_of<T: ?Sized>(value: *const T) -> usize {
    value.cast::<()>().addr()
}

macro_rules! impl_pointer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: ?Sized + Dump> Dump for $ty {
                fn kind(&self) -> Kind {
                    Kind::Pointer
                }

                fn dump(&self, walker: &mut Walker<'_>) {
                    let target: &T = self;
                    walker.write_pointer(address_of(target), target);
                }

                fn static_kind() -> Option<Kind> {
                    Some(Kind::Pointer)
                }
            }
        )*
    };
}

impl_pointer!(Box<T>, Rc<T>, Arc<T>, triomphe::Arc<T>);

/// References are pointers, except references to strings, which render as
/// the string itself and are never tracked.
macro_rules! impl_reference {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: ?Sized + Dump> Dump for $ty {
                fn kind(&self) -> Kind {
                    match (**self).kind() {
                        Kind::String => Kind::String,
                        _ => Kind::Pointer,
                    }
                }

                fn dump(&self, walker: &mut Walker<'_>) {
                    let target: &T = self;
                    if target.kind() == Kind::String {
                        target.dump(walker);
                    } else {
                        walker.write_pointer(address_of(target), target);
                    }
                }
            }
        )*
    };
}

impl_reference!(&T, &mut T);

/// A dangling weak pointer prints `nil`.
impl<T: ?Sized + Dump> Dump for rc::Weak<T> {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        match self.upgrade() {
            Some(target) => target.dump(walker),
            None => walker.write_nil(),
        }
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::Pointer)
    }
}

/// A dangling weak pointer prints `nil`.
impl<T: ?Sized + Dump> Dump for sync::Weak<T> {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        match self.upgrade() {
            Some(target) => target.dump(walker),
            None => walker.write_nil(),
        }
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::Pointer)
    }
}

/// `None` prints `nil`; `Some` is transparent.
impl<T: Dump> Dump for Option<T> {
    fn kind(&self) -> Kind {
        match self {
            Some(value) => value.kind(),
            None => T::static_kind().unwrap_or(Kind::Pointer),
        }
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        match self {
            Some(value) => value.dump(walker),
            None => walker.write_nil(),
        }
    }

    fn is_simple(&self, walker: &Walker<'_>) -> bool {
        match self {
            Some(value) => value.is_simple(walker),
            None => self.kind().is_always_simple(),
        }
    }

    fn static_kind() -> Option<Kind> {
        T::static_kind()
    }
}

/// Whether a raw pointer can be printed inline.
///
/// Raw pointers are never dereferenced. They count as simple when null, when
/// their target type is always simple, or when an enclosing pointer already
/// expanded their target.
fn raw_is_simple<T: Dump>(address: usize, walker: &Walker<'_>) -> bool {
    address == 0
        || T::static_kind().is_some_and(Kind::is_always_simple)
        || walker.has_seen_pointer(address)
}

macro_rules! impl_raw_pointer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: Dump> Dump for $ty {
                fn kind(&self) -> Kind {
                    Kind::RawPointer
                }

                fn dump(&self, walker: &mut Walker<'_>) {
                    walker.write_raw_pointer(&type_label::<Self>(), self.addr());
                }

                fn is_simple(&self, walker: &Walker<'_>) -> bool {
                    raw_is_simple::<T>(self.addr(), walker)
                }

                fn static_kind() -> Option<Kind> {
                    Some(Kind::RawPointer)
                }
            }
        )*
    };
}

impl_raw_pointer!(*const T, *mut T);

impl<T: Dump> Dump for NonNull<T> {
    fn kind(&self) -> Kind {
        Kind::RawPointer
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        walker.write_raw_pointer(&type_label::<Self>(), self.addr().get());
    }

    fn is_simple(&self, walker: &Walker<'_>) -> bool {
        raw_is_simple::<T>(self.addr().get(), walker)
    }

    fn static_kind() -> Option<Kind> {
        Some(Kind::RawPointer)
    }
}
