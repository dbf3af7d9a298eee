pub mod delayed;
pub mod lazy_stream;

pub use delayed::{delay, Delayed};
pub use lazy_stream::{Slot, Stream, StreamCell};
