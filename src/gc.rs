use std::ops::Deref;

pub use shared::Shared;

pub mod shared {
    use std::rc::Rc;

    // Streams are single threaded: forcing a cell is an unsynchronized one-time write.
    pub type Shared<T> = Rc<T>;
}

/// This is simply a newtype around the `Rc` type.
/// It does not expose the full functionality of the `Rc` type,
/// just what the stream cells need for structural sharing.
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Gc<T: ?Sized>(pub(crate) Shared<T>);

impl<T> Gc<T> {
    pub fn new(val: T) -> Gc<T> {
        Gc(Shared::new(val))
    }

    pub fn try_unwrap(self) -> Result<T, Gc<T>> {
        Shared::try_unwrap(self.0).map_err(|x| Gc(x))
    }
}

impl<T: ?Sized> Gc<T> {
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Shared::ptr_eq(&this.0, &other.0)
    }

    pub fn strong_count(this: &Self) -> usize {
        Shared::strong_count(&this.0)
    }
}

impl<T: ?Sized> Deref for Gc<T> {
    type Target = T;
    fn deref(&self) -> &T {
        self.0.deref()
    }
}

impl<T: ?Sized> Clone for Gc<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        Gc(Shared::clone(&self.0))
    }
}
