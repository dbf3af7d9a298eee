//! Stream combinators.
//!
//! Everything here goes through the public cell contract: read a head, force a tail.
//! Combinators that only look at heads (`map`, `map2`, `concat`, `interleave`, `take`)
//! never force anything when they are built. The ones that have to search for their
//! first element (`filter`, `flatten`, `flat_map`, `skip`, `skip_while`) force tails
//! until they find it, which is why they return a `Result`.
//!
//! `filter`, `skip_while`, `flatten` and `flat_map` do not terminate when an infinite
//! input never produces a matching (or non empty) element. That is a property of the
//! algebra; bound consumption with `take` or `element_at`.

use crate::gc::Gc;
use crate::rvals::Result;
use crate::values::lazy_stream::{Stream, StreamCell};

impl<T: Clone + 'static> Stream<T> {
    /// Keeps the elements satisfying `pred`.
    ///
    /// Forces the source up to the first match; the rest is filtered lazily.
    pub fn filter<P>(&self, pred: P) -> Result<Stream<T>>
    where
        P: Fn(&T) -> bool + 'static,
    {
        filter_with(self.clone(), Gc::new(pred))
    }

    pub fn map<U, F>(&self, f: F) -> Stream<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        map_with(self, Gc::new(f))
    }

    /// Combines two streams element by element, ending with the shorter one.
    pub fn map2<U, V, F>(&self, other: &Stream<U>, f: F) -> Stream<V>
    where
        U: Clone + 'static,
        V: 'static,
        F: Fn(T, U) -> V + 'static,
    {
        map2_with(self, other, Gc::new(f))
    }

    /// Same as [`Stream::map2`].
    pub fn zip<U, V, F>(&self, other: &Stream<U>, f: F) -> Stream<V>
    where
        U: Clone + 'static,
        V: 'static,
        F: Fn(T, U) -> V + 'static,
    {
        self.map2(other, f)
    }

    /// Monadic bind: every element expands into a stream and the results are
    /// concatenated in order.
    pub fn flat_map<U, F>(&self, f: F) -> Result<Stream<U>>
    where
        U: Clone + 'static,
        F: Fn(T) -> Stream<U> + 'static,
    {
        self.map(f).flatten()
    }

    /// Two clause comprehension: `for t in self, for u in k(t), yield s(t, u)`.
    pub fn flat_map_with<U, V, K, S>(&self, k: K, s: S) -> Result<Stream<V>>
    where
        U: Clone + 'static,
        V: Clone + 'static,
        K: Fn(T) -> Stream<U> + 'static,
        S: Fn(T, U) -> V + 'static,
    {
        let s = Gc::new(s);
        self.flat_map(move |t: T| {
            let s = Gc::clone(&s);
            let bound = t.clone();
            k(t).map(move |u| s(bound.clone(), u))
        })
    }

    /// All of `self`, then all of `other`. `other` is not looked at until `self` ends.
    pub fn concat(&self, other: &Stream<T>) -> Stream<T> {
        match self {
            Stream::End => other.clone(),
            Stream::Cons(cell) => {
                let cell = Gc::clone(cell);
                let other = other.clone();
                Stream::cons(cell.head().clone(), move || Ok(cell.tail()?.concat(&other)))
            }
        }
    }

    /// Alternates between the two streams. Once either side ends the remainder of
    /// the other is returned as is.
    pub fn interleave(&self, other: &Stream<T>) -> Stream<T> {
        match self {
            Stream::End => other.clone(),
            Stream::Cons(cell) => {
                let cell = Gc::clone(cell);
                let other = other.clone();
                Stream::cons(cell.head().clone(), move || {
                    Ok(other.interleave(&cell.tail()?))
                })
            }
        }
    }

    /// Drops up to `n` leading elements. Running out early gives `End`, not an error.
    pub fn skip(&self, n: i64) -> Result<Stream<T>> {
        let mut current = self.clone();

        for _ in 0..n {
            current = match &current {
                Stream::End => break,
                Stream::Cons(cell) => cell.tail()?,
            };
        }

        Ok(current)
    }

    /// Drops the leading run of elements satisfying `pred`.
    pub fn skip_while<P>(&self, pred: P) -> Result<Stream<T>>
    where
        P: Fn(&T) -> bool,
    {
        let mut current = self.clone();

        loop {
            let next = match &current {
                Stream::Cons(cell) if pred(cell.head()) => cell.tail()?,
                _ => break,
            };
            current = next;
        }

        Ok(current)
    }

    /// At most the first `n` elements. Never forces past the `n`th cell.
    pub fn take(&self, n: i64) -> Stream<T> {
        match self {
            _ if n <= 0 => Stream::End,
            Stream::End => Stream::End,
            Stream::Cons(cell) if n == 1 => Stream::single(cell.head().clone()),
            Stream::Cons(cell) => {
                let cell = Gc::clone(cell);
                Stream::cons(cell.head().clone(), move || Ok(cell.tail()?.take(n - 1)))
            }
        }
    }
}

impl<T: Clone + 'static> Stream<Stream<T>> {
    /// Concatenates a stream of streams, skipping empty inner streams.
    pub fn flatten(&self) -> Result<Stream<T>> {
        match self {
            Stream::End => Ok(Stream::End),
            Stream::Cons(outer) => drain(outer.head().clone(), Gc::clone(outer)),
        }
    }
}

// `owner` is the outer cell `inner` came from; its tail is the remaining outer stream,
// which is only forced once `inner` runs dry.
fn drain<T>(mut inner: Stream<T>, mut owner: Gc<StreamCell<Stream<T>>>) -> Result<Stream<T>>
where
    T: Clone + 'static,
{
    loop {
        if let Stream::Cons(cell) = &inner {
            let cell = Gc::clone(cell);
            return Ok(Stream::cons(cell.head().clone(), move || {
                drain(cell.tail()?, owner)
            }));
        }

        match owner.tail()? {
            Stream::End => return Ok(Stream::End),
            Stream::Cons(next) => {
                inner = next.head().clone();
                owner = next;
            }
        }
    }
}

fn filter_with<T, P>(mut current: Stream<T>, pred: Gc<P>) -> Result<Stream<T>>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + 'static,
{
    loop {
        current = match &current {
            Stream::End => return Ok(Stream::End),
            Stream::Cons(cell) if pred(cell.head()) => {
                let cell = Gc::clone(cell);
                return Ok(Stream::cons(cell.head().clone(), move || {
                    filter_with(cell.tail()?, pred)
                }));
            }
            Stream::Cons(cell) => cell.tail()?,
        };
    }
}

fn map_with<T, U, F>(stream: &Stream<T>, f: Gc<F>) -> Stream<U>
where
    T: Clone + 'static,
    U: 'static,
    F: Fn(T) -> U + 'static,
{
    match stream {
        Stream::End => Stream::End,
        Stream::Cons(cell) => {
            let head = f(cell.head().clone());
            let cell = Gc::clone(cell);
            Stream::cons(head, move || Ok(map_with(&cell.tail()?, f)))
        }
    }
}

fn map2_with<T, U, V, F>(left: &Stream<T>, right: &Stream<U>, f: Gc<F>) -> Stream<V>
where
    T: Clone + 'static,
    U: Clone + 'static,
    V: 'static,
    F: Fn(T, U) -> V + 'static,
{
    match (left, right) {
        (Stream::Cons(l), Stream::Cons(r)) => {
            let head = f(l.head().clone(), r.head().clone());
            let (l, r) = (Gc::clone(l), Gc::clone(r));
            Stream::cons(head, move || Ok(map2_with(&l.tail()?, &r.tail()?, f)))
        }
        _ => Stream::End,
    }
}
