use proptest::prelude::*;

use crate::gc::Gc;
use crate::rvals::Result;
use crate::values::{delay, Delayed, Slot, Stream};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn add_streams(s1: &Stream<f64>, s2: &Stream<f64>) -> Stream<f64> {
    s1.map2(s2, |x, y| x + y)
}

fn partial_sums(stream: &Stream<f64>) -> Stream<f64> {
    let source = stream.clone();
    let first = *stream.head().unwrap_or(&0.0);

    Stream::recursive(move |sums| {
        Stream::cons(first, move || Ok(add_streams(&source.tail()?, &sums.get()?)))
    })
}

fn pi_summands(n: f64) -> Stream<f64> {
    Stream::cons(1.0 / n, move || Ok(pi_summands(n + 2.0).map(|x| -x)))
}

fn euler_transform(s: Stream<f64>) -> Result<Stream<f64>> {
    let s0 = s.element_at(0)?;
    let s1 = s.element_at(1)?;
    let s2 = s.element_at(2)?;

    let head = s2 - (s2 - s1) * (s2 - s1) / (s0 - 2.0 * s1 + s2);
    Ok(Stream::cons(head, move || euler_transform(s.tail()?)))
}

// y' = f(y), y(0) = y0, integrated with step dt. `dy` is only known once `y` exists.
fn integral(integrand: Gc<Delayed<Stream<f64>>>, initial: f64, dt: f64) -> Stream<f64> {
    Stream::recursive(move |int| {
        Stream::cons(initial, move || {
            let scaled = integrand.force()?.map(move |x| x * dt);
            Ok(add_streams(&scaled, &int.get()?))
        })
    })
}

fn solve(f: fn(f64) -> f64, y0: f64, dt: f64) -> Result<Stream<f64>> {
    let y_slot: Slot<f64> = Slot::new();

    let captured = y_slot.clone();
    let dy = Gc::new(delay(move || Ok(captured.get()?.map(f))));

    let y = integral(dy, y0, dt);
    y_slot.bind(&y)?;
    Ok(y)
}

#[test]
fn fibonacci_refers_to_itself() {
    init_logging();

    let fibs = Stream::recursive(|fibs| {
        Stream::cons(0u64, move || {
            Ok(Stream::cons(1u64, move || {
                let all = fibs.get()?;
                Ok(all.map2(&all.tail()?, |a, b| a + b))
            }))
        })
    });

    assert_eq!(
        fibs.take(10).to_vec().unwrap(),
        vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]
    );
    assert_eq!(fibs.element_at(50).unwrap(), 12_586_269_025);
}

#[test]
fn partial_sums_of_integers() {
    let integers = Stream::iterate(|x: &f64| x + 1.0, 1.0);
    let sums = partial_sums(&integers);

    assert_eq!(sums.take(5).to_vec().unwrap(), vec![1.0, 3.0, 6.0, 10.0, 15.0]);
}

#[test]
fn euler_accelerated_pi() {
    let pi_stream = partial_sums(&pi_summands(1.0)).map(|x| x * 4.0);
    let accelerated = euler_transform(pi_stream.clone()).unwrap();

    let plain = pi_stream.element_at(8).unwrap();
    let fast = accelerated.element_at(8).unwrap();

    assert!((fast - std::f64::consts::PI).abs() < 1e-3);
    assert!((fast - std::f64::consts::PI).abs() < (plain - std::f64::consts::PI).abs());
}

#[test]
fn delayed_integrand_solves_exponential() {
    init_logging();

    let y = solve(|y| y, 1.0, 0.001).unwrap();
    let e = y.element_at(1000).unwrap();

    assert!((e - std::f64::consts::E).abs() < 0.01);
}

#[test]
fn round_trip_through_iterator() {
    let source = vec!["ab", "cd", "ef"];
    let stream = Stream::from_iterator(source.clone());

    assert_eq!(stream.to_vec().unwrap(), source);
}

fn small_vec() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1000i64..1000, 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn from_iterator_round_trips(values in small_vec()) {
        let stream = Stream::from_iterator(values.clone());
        prop_assert_eq!(stream.to_vec().unwrap(), values);
    }

    #[test]
    fn zip_and_map2_agree(left in small_vec(), right in small_vec()) {
        let l = Stream::from(left.clone());
        let r = Stream::from(right.clone());

        let zipped = l.zip(&r, |x, y| x * 3 - y).to_vec().unwrap();
        let mapped = l.map2(&r, |x, y| x * 3 - y).to_vec().unwrap();

        prop_assert_eq!(zipped.len(), left.len().min(right.len()));
        prop_assert_eq!(zipped, mapped);
    }

    #[test]
    fn range_matches_std(start in -500i64..500, count in -5i64..60) {
        let expected: Vec<i64> = (start..start + count.max(0)).collect();
        prop_assert_eq!(Stream::range(start, count).to_vec().unwrap(), expected);
    }

    #[test]
    fn filter_matches_std(values in small_vec()) {
        let stream = Stream::from(values.clone());
        let evens = stream.filter(|x| x % 2 == 0).unwrap().to_vec().unwrap();
        let expected: Vec<i64> = values.into_iter().filter(|x| x % 2 == 0).collect();
        prop_assert_eq!(evens, expected);
    }

    #[test]
    fn concat_preserves_order(left in small_vec(), right in small_vec()) {
        let joined = Stream::from(left.clone()).concat(&Stream::from(right.clone()));
        let expected: Vec<i64> = left.into_iter().chain(right).collect();
        prop_assert_eq!(joined.to_vec().unwrap(), expected);
    }

    #[test]
    fn skip_and_skip_while_match_std(values in small_vec(), n in -3i64..50, bound in -1000i64..1000) {
        let stream = Stream::from(values.clone());

        let skipped = stream.skip(n).unwrap().to_vec().unwrap();
        let expected: Vec<i64> = values.iter().copied().skip(n.max(0) as usize).collect();
        prop_assert_eq!(skipped, expected);

        let dropped = stream.skip_while(move |x| *x < bound).unwrap().to_vec().unwrap();
        let expected: Vec<i64> = values.iter().copied().skip_while(|x| *x < bound).collect();
        prop_assert_eq!(dropped, expected);
    }

    #[test]
    fn flatten_matches_std(nested in prop::collection::vec(small_vec(), 0..8)) {
        let streams: Vec<Stream<i64>> = nested.iter().cloned().map(Stream::from).collect();
        let flat = Stream::from(streams).flatten().unwrap().to_vec().unwrap();
        let expected: Vec<i64> = nested.into_iter().flatten().collect();
        prop_assert_eq!(flat, expected);
    }

    #[test]
    fn interleave_contains_both_inputs(left in small_vec(), right in small_vec()) {
        let mixed = Stream::from(left.clone())
            .interleave(&Stream::from(right.clone()))
            .to_vec()
            .unwrap();

        prop_assert_eq!(mixed.len(), left.len() + right.len());

        let shared = left.len().min(right.len());
        for i in 0..shared {
            prop_assert_eq!(mixed[2 * i], left[i]);
            prop_assert_eq!(mixed[2 * i + 1], right[i]);
        }
    }

    #[test]
    fn element_at_matches_index(values in small_vec(), index in -5i64..50) {
        let stream = Stream::from(values.clone());
        match values.get(index as usize) {
            Some(expected) if index >= 0 => prop_assert_eq!(stream.element_at(index).unwrap(), *expected),
            _ => prop_assert!(stream.element_at(index).is_err()),
        }
    }
}
