use core::cell::{Cell, RefCell};

use crate::{Dump, Kind, Walker};

impl<T: Copy + Dump> Dump for Cell<T> {
    fn kind(&self) -> Kind {
        self.get().kind()
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        self.get().dump(walker);
    }

    fn is_simple(&self, walker: &Walker<'_>) -> bool {
        self.get().is_simple(walker)
    }

    fn static_kind() -> Option<Kind> {
        T::static_kind()
    }
}

/// A cell that is mutably borrowed elsewhere prints `invalid`.
impl<T: ?Sized + Dump> Dump for RefCell<T> {
    fn kind(&self) -> Kind {
        self.try_borrow()
            .map_or(Kind::Invalid, |value| value.kind())
    }

    fn dump(&self, walker: &mut Walker<'_>) {
        match self.try_borrow() {
            Ok(value) => value.dump(walker),
            Err(_) => walker.write_invalid(),
        }
    }

    fn is_simple(&self, walker: &Walker<'_>) -> bool {
        match self.try_borrow() {
            Ok(value) => value.is_simple(walker),
            Err(_) => true,
        }
    }
}
