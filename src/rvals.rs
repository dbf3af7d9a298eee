use crate::rerrs::StreamErr;

pub type Result<T> = std::result::Result<T, StreamErr>;

/// A boxed nullary producer, consumed the first time it is run.
pub type Thunk<T> = Box<dyn FnOnce() -> Result<T>>;
