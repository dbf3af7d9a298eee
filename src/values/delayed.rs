use std::cell::Cell;
use std::fmt;

use once_cell::unsync::OnceCell;

use crate::rvals::{Result, Thunk};
use crate::stop;

/// A promise: a nullary computation that runs at most once.
///
/// The producer is dropped as soon as it has run and its result (including a failure)
/// is cached for the lifetime of the value. Forcing a failed promise again hands back
/// the same error rather than rerunning the producer.
pub struct Delayed<T> {
    thunk: Cell<Option<Thunk<T>>>,
    memo: OnceCell<Result<T>>,
}

/// Shorthand for [`Delayed::new`].
pub fn delay<T, F>(producer: F) -> Delayed<T>
where
    F: FnOnce() -> Result<T> + 'static,
{
    Delayed::new(producer)
}

impl<T> Delayed<T> {
    pub fn new<F>(producer: F) -> Self
    where
        F: FnOnce() -> Result<T> + 'static,
    {
        Delayed {
            thunk: Cell::new(Some(Box::new(producer))),
            memo: OnceCell::new(),
        }
    }

    /// An already forced value, there is no producer to run.
    pub fn ready(value: T) -> Self {
        Delayed {
            thunk: Cell::new(None),
            memo: OnceCell::with_value(Ok(value)),
        }
    }

    pub fn is_forced(&self) -> bool {
        self.memo.get().is_some()
    }

    /// Looks at the memoized result without forcing.
    pub fn peek(&self) -> Option<&Result<T>> {
        self.memo.get()
    }

    // Only used while tearing down a stream cell, so a failure is simply discarded.
    pub(crate) fn take_memo(&mut self) -> Option<T> {
        self.memo.take().and_then(|res| res.ok())
    }
}

impl<T: Clone> Delayed<T> {
    pub fn force(&self) -> Result<T> {
        if let Some(memo) = self.memo.get() {
            return memo.clone();
        }

        // The thunk is taken out before it runs, so seeing `None` here
        // means the producer is somewhere further up the call stack.
        let thunk = match self.thunk.take() {
            Some(thunk) => thunk,
            None => {
                log::debug!(target: "streams", "delayed value forced from inside its own producer");
                stop!(ReentrantForce => "delayed value was forced while its producer was running")
            }
        };

        log::trace!(target: "streams", "running delayed producer");
        let result = thunk();

        if let Err(e) = &result {
            log::debug!(target: "streams", "memoizing failed producer: {}", e);
        }

        self.memo.get_or_init(move || result).clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for Delayed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.memo.get() {
            Some(Ok(value)) => write!(f, "#<promise {value:?}>"),
            Some(Err(e)) => write!(f, "#<promise failed: {e}>"),
            None => write!(f, "#<promise pending>"),
        }
    }
}
