use crate::gc::Gc;
use crate::values::lazy_stream::Stream;

impl<T: Clone + 'static> Stream<T> {
    /// `seed, f(seed), f(f(seed)), ...`
    ///
    /// Never ends, so consumers have to bound how far they force it.
    pub fn iterate<F>(f: F, seed: T) -> Self
    where
        F: Fn(&T) -> T + 'static,
    {
        iterate_with(Gc::new(f), seed)
    }

    /// The same value forever.
    pub fn repeat(value: T) -> Self {
        Stream::cons(value.clone(), move || Ok(Stream::repeat(value)))
    }

    /// `value` exactly `count` times, a non positive count is the empty stream.
    pub fn repeat_n(value: T, count: i64) -> Self {
        if count <= 0 {
            return Stream::End;
        }

        Stream::cons(value.clone(), move || Ok(Stream::repeat_n(value, count - 1)))
    }
}

fn iterate_with<T, F>(f: Gc<F>, seed: T) -> Stream<T>
where
    T: Clone + 'static,
    F: Fn(&T) -> T + 'static,
{
    Stream::cons(seed.clone(), move || {
        let next = f(&seed);
        Ok(iterate_with(f, next))
    })
}

impl Stream<i64> {
    /// `count` consecutive integers starting at `start`, cut short at `i64::MAX`.
    pub fn range(start: i64, count: i64) -> Self {
        if count <= 0 {
            return Stream::End;
        }

        Stream::cons(start, move || match start.checked_add(1) {
            Some(next) if count > 1 => Ok(Stream::range(next, count - 1)),
            _ => Ok(Stream::End),
        })
    }
}

impl<T: 'static> Stream<T> {
    /// Wraps an iterator, pulling one element each time a tail is forced.
    ///
    /// The first element is pulled right away to decide between `End` and a cell.
    pub fn from_iterator<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        pull(iter.into_iter())
    }
}

fn pull<T, I>(mut iter: I) -> Stream<T>
where
    T: 'static,
    I: Iterator<Item = T> + 'static,
{
    match iter.next() {
        Some(head) => Stream::cons(head, move || Ok(pull(iter))),
        None => Stream::End,
    }
}

// `collect` cannot name the lifetime of its source, so it buffers first.
// Use `Stream::from_iterator` to stay incremental.
impl<T: 'static> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        pull(iter.into_iter().collect::<Vec<_>>().into_iter())
    }
}

impl<T: 'static> From<Vec<T>> for Stream<T> {
    fn from(values: Vec<T>) -> Self {
        pull(values.into_iter())
    }
}
