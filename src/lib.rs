//! Lazy, memoizing streams in the style of SICP.
//!
//! A [`Stream`] is either [`Stream::End`] or a cons cell with an eager head and a
//! tail that is computed on first access and cached from then on. [`Delayed`] is
//! the same one-shot cache on its own. The combinators (`filter`, `map`, `map2`,
//! `flat_map`, `concat`, `interleave`, `flatten`, `skip`, ...) build new streams
//! without forcing more of their inputs than they have to.
//!
//! Everything is single threaded: cells are shared through `Rc` and memoized
//! through interior mutability without any locking.
//!
//! ```
//! use lazy_streams::Stream;
//!
//! let evens = Stream::iterate(|x: &i64| x + 1, 1)
//!     .filter(|x| x % 2 == 0)
//!     .unwrap();
//!
//! assert_eq!(evens.take(3).to_vec().unwrap(), vec![2, 4, 6]);
//! ```

#[macro_use]
pub mod rerrs;
pub mod gc;
pub mod primitives;
pub mod rvals;
pub mod values;

#[cfg(test)]
mod tests;

pub use self::{
    primitives::StreamIter,
    rerrs::{ErrorKind, StreamErr},
    rvals::Result,
    values::{delay, Delayed, Slot, Stream, StreamCell},
};
