use std::fmt;

use once_cell::unsync::OnceCell;

use crate::gc::Gc;
use crate::rvals::Result;
use crate::stop;
use crate::values::delayed::Delayed;

/// A possibly infinite, memoizing sequence.
///
/// `End` is an explicit terminal, so a stream of streams can hold an empty
/// inner stream without it being confused with the end of the outer one.
pub enum Stream<T> {
    End,
    Cons(Gc<StreamCell<T>>),
}

/// A single cons cell: the head is eager, the tail is forced at most once.
pub struct StreamCell<T> {
    head: T,
    tail: Delayed<Stream<T>>,
}

impl<T> StreamCell<T> {
    pub fn head(&self) -> &T {
        &self.head
    }

    pub fn is_tail_forced(&self) -> bool {
        self.tail.is_forced()
    }

    /// Forces (or reads the memo of) the rest of the stream.
    pub fn tail(&self) -> Result<Stream<T>> {
        self.tail.force()
    }
}

// A fully forced chain of cells would otherwise be dropped recursively, one
// stack frame per cell. Unlink uniquely owned successors in a loop instead.
impl<T> Drop for StreamCell<T> {
    fn drop(&mut self) {
        let mut next = self.tail.take_memo();

        while let Some(Stream::Cons(cell)) = next {
            match cell.try_unwrap() {
                Ok(mut cell) => next = cell.tail.take_memo(),
                Err(_) => break,
            }
        }
    }
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        match self {
            Stream::End => Stream::End,
            Stream::Cons(cell) => Stream::Cons(Gc::clone(cell)),
        }
    }
}

impl<T> Default for Stream<T> {
    fn default() -> Self {
        Stream::End
    }
}

impl<T> Stream<T> {
    pub fn end() -> Self {
        Stream::End
    }

    /// Builds a cell without running `tail`.
    pub fn cons<F>(head: T, tail: F) -> Self
    where
        F: FnOnce() -> Result<Stream<T>> + 'static,
    {
        Stream::Cons(Gc::new(StreamCell {
            head,
            tail: Delayed::new(tail),
        }))
    }

    /// A stream of exactly one element.
    pub fn single(value: T) -> Self {
        Stream::Cons(Gc::new(StreamCell {
            head: value,
            tail: Delayed::ready(Stream::End),
        }))
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Stream::End)
    }

    pub fn head(&self) -> Option<&T> {
        match self {
            Stream::End => None,
            Stream::Cons(cell) => Some(cell.head()),
        }
    }

    pub fn tail(&self) -> Result<Stream<T>> {
        match self {
            Stream::End => stop!(IndexOutOfRange => "stream-cdr: the stream is empty"),
            Stream::Cons(cell) => cell.tail(),
        }
    }

    /// Whether the tail of the first cell has been memoized. `End` has no tail to force.
    pub fn is_tail_forced(&self) -> bool {
        match self {
            Stream::End => true,
            Stream::Cons(cell) => cell.is_tail_forced(),
        }
    }

    /// Two streams are the same stream when they share their first cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Stream::End, Stream::End) => true,
            (Stream::Cons(l), Stream::Cons(r)) => Gc::ptr_eq(l, r),
            _ => false,
        }
    }
}

impl<T: 'static> Stream<T> {
    /// Builds a stream whose own tail can refer back to it.
    ///
    /// The builder receives an unbound [`Slot`] that is bound to the returned stream
    /// once the builder finishes, so the slot may only be read from inside a tail.
    /// The slot owns the stream and the stream's tail owns the slot, so the cells
    /// are not reclaimed until the program exits.
    pub fn recursive<F>(build: F) -> Self
    where
        F: FnOnce(Slot<T>) -> Stream<T>,
    {
        let slot = Slot::new();
        let stream = build(slot.clone());
        let _ = slot.inner.set(stream.clone());
        stream
    }
}

const DEBUG_PRINT_LIMIT: usize = 32;

// Walks only the already forced prefix, never runs a producer. Self referential
// streams are cyclic once forced, hence the limit.
impl<T: fmt::Debug> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<stream")?;

        let mut current = self.clone();
        for _ in 0..DEBUG_PRINT_LIMIT {
            let next = match &current {
                Stream::End => return write!(f, ">"),
                Stream::Cons(cell) => {
                    write!(f, " {:?}", cell.head())?;
                    match cell.tail.peek() {
                        Some(Ok(next)) => next.clone(),
                        Some(Err(_)) => return write!(f, " !>"),
                        None => return write!(f, " ...>"),
                    }
                }
            };
            current = next;
        }

        write!(f, " ...>")
    }
}

/// A placeholder for a stream that is not built yet.
///
/// Closures capture the slot, the stream is bound to it afterwards. The slot
/// owns the bound stream, so a tail reading it keeps working after the caller
/// has let go of the head.
pub struct Slot<T> {
    inner: Gc<OnceCell<Stream<T>>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Slot {
            inner: Gc::clone(&self.inner),
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Slot<T> {
    pub fn new() -> Self {
        Slot {
            inner: Gc::new(OnceCell::new()),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.inner.get().is_some()
    }

    pub fn bind(&self, stream: &Stream<T>) -> Result<()> {
        if self.inner.set(stream.clone()).is_err() {
            stop!(InvalidArgument => "slot has already been bound to a stream")
        }
        Ok(())
    }

    pub fn get(&self) -> Result<Stream<T>> {
        match self.inner.get() {
            Some(stream) => Ok(stream.clone()),
            None => {
                log::debug!(target: "streams", "slot read before bind");
                stop!(InvalidArgument => "slot was read before a stream was bound to it")
            }
        }
    }
}
