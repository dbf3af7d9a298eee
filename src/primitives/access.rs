use crate::gc::Gc;
use crate::rvals::Result;
use crate::stop;
use crate::values::lazy_stream::{Stream, StreamCell};

impl<T: Clone> Stream<T> {
    /// The element at `index`, counting from zero.
    pub fn element_at(&self, index: i64) -> Result<T> {
        if index < 0 {
            stop!(IndexOutOfRange => "stream-ref: index {} is negative", index)
        }

        let mut current = self.clone();
        for _ in 0..index {
            current = match &current {
                Stream::End => break,
                Stream::Cons(cell) => cell.tail()?,
            };
        }

        match current {
            Stream::Cons(cell) => Ok(cell.head().clone()),
            Stream::End => {
                stop!(IndexOutOfRange => "stream-ref: index {} is past the end of the stream", index)
            }
        }
    }

    /// A fresh pull iterator over the stream.
    ///
    /// Each call starts again from the first cell; cells already forced by an earlier
    /// pass are reused, not recomputed.
    pub fn iter(&self) -> StreamIter<T> {
        StreamIter {
            cursor: Cursor::Start(self.clone()),
        }
    }

    /// Forces every remaining cell. Only returns for finite streams.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.iter().collect()
    }
}

enum Cursor<T> {
    Start(Stream<T>),
    // The cell whose head was yielded last; its tail is forced on the next pull.
    After(Gc<StreamCell<T>>),
    Done,
}

/// Iterator over the elements of a [`Stream`].
///
/// A tail is forced only when the element after it is requested. If forcing fails
/// the error is yielded once and the iterator is exhausted.
pub struct StreamIter<T> {
    cursor: Cursor<T>,
}

impl<T: Clone> Iterator for StreamIter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let stream = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Start(stream) => stream,
            Cursor::After(cell) => match cell.tail() {
                Ok(stream) => stream,
                Err(e) => return Some(Err(e)),
            },
            Cursor::Done => return None,
        };

        match stream {
            Stream::End => None,
            Stream::Cons(cell) => {
                let head = cell.head().clone();
                self.cursor = Cursor::After(cell);
                Some(Ok(head))
            }
        }
    }
}

impl<'a, T: Clone> IntoIterator for &'a Stream<T> {
    type Item = Result<T>;
    type IntoIter = StreamIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
