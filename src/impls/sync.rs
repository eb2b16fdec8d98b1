use std::sync::{
    Mutex, RwLock, TryLockError,
    mpsc::{Receiver, Sender, SyncSender},
};

use crate::{Dump, Kind, Walker, type_label};

macro_rules! impl_channel {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T> Dump for $ty<T> {
                fn kind(&self) -> Kind {
                    Kind::Channel
                }

                fn dump(&self, walker: &mut Walker<'_>) {
                    walker.write_type(&type_label::<Self>());
                }

                fn static_kind() -> Option<Kind> {
                    Some(Kind::Channel)
                }
            }
        )*
    };
}

impl_channel!(Sender, SyncSender, Receiver);

/// Renders the guarded value, or `invalid` when the lock is held elsewhere.
///
/// A poisoned lock is still read: the data is what the dump is for.
macro_rules! impl_lock {
    ($ty:ident, $try_lock:ident) => {
        impl<T: ?Sized + Dump> Dump for $ty<T> {
            fn kind(&self) -> Kind {
                match self.$try_lock() {
                    Ok(value) => value.kind(),
                    Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().kind(),
                    Err(TryLockError::WouldBlock) => Kind::Invalid,
                }
            }

            fn dump(&self, walker: &mut Walker<'_>) {
                match self.$try_lock() {
                    Ok(value) => value.dump(walker),
                    Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().dump(walker),
                    Err(TryLockError::WouldBlock) => walker.write_invalid(),
                }
            }

            fn is_simple(&self, walker: &Walker<'_>) -> bool {
                match self.$try_lock() {
                    Ok(value) => value.is_simple(walker),
                    Err(TryLockError::Poisoned(poisoned)) => {
                        poisoned.into_inner().is_simple(walker)
                    }
                    Err(TryLockError::WouldBlock) => true,
                }
            }
        }
    };
}

impl_lock!(Mutex, try_lock);
impl_lock!(RwLock, try_read);
