#[cfg(feature = "std")]
use std::sync as impl_;

#[cfg(not(feature = "std"))]
use spin as impl_;

/// A global slot guarded by a reader-writer lock.
///
/// Uses the standard library lock when `std` is enabled and a spin lock
/// otherwise.
#[repr(transparent)]
pub(crate) struct HookLock<T: 'static + Send + Sync>(impl_::RwLock<Option<T>>);

impl<T: 'static + Send + Sync> HookLock<T> {
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self(impl_::RwLock::new(None))
    }

    /// Calls `f` with the current content while holding the read lock.
    #[inline]
    pub(crate) fn with<R>(&'static self, f: impl FnOnce(Option<&T>) -> R) -> R {
        #[cfg(not(feature = "std"))]
        let guard = self.0.read();

        #[cfg(feature = "std")]
        let guard = self.0.read().expect("Unable to acquire hook lock");

        f(guard.as_ref())
    }

    /// Stores `value` unless the slot is occupied, in which case `value` is
    /// handed back.
    pub(crate) fn install(&'static self, value: T) -> Result<(), T> {
        let mut guard = self.write();
        if guard.is_some() {
            return Err(value);
        }
        *guard = Some(value);
        Ok(())
    }

    /// Stores `value` and returns the previous content.
    pub(crate) fn replace(&'static self, value: Option<T>) -> Option<T> {
        core::mem::replace(&mut *self.write(), value)
    }

    #[cfg(feature = "std")]
    fn write(&'static self) -> impl_::RwLockWriteGuard<'static, Option<T>> {
        self.0.write().expect("Unable to acquire hook lock")
    }

    #[cfg(not(feature = "std"))]
    fn write(&'static self) -> impl_::RwLockWriteGuard<'static, Option<T>> {
        self.0.write()
    }
}
