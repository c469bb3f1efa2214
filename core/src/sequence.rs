//! Lazy pipelines whose stages may fail with a declared error type.
//!
//! [`GuardedSeq`] wraps an ordinary iterator. Every shim handed to a stage is
//! passed through the pipeline's [`Tunnel`] before it reaches the `std::iter`
//! adapters, so those adapters only ever see plain closures. Terminal
//! operations run under [`Tunnel::guard`] and return the first declared
//! failure as `Err`.
//!
//! ```
//! use outcome_core::GuardedSeq;
//!
//! let total = GuardedSeq::<_, std::num::ParseIntError>::wrap(vec!["1", "2", "3"])
//!     .map(|s: &str| s.parse::<i32>())
//!     .reduce(0, |a: i32, b: i32| Ok(a + b));
//!
//! assert_eq!(total, Ok(6));
//! ```
use std::{cmp::Ordering, collections::HashSet, hash::Hash};

use log::trace;

use crate::{
    outcome::Outcome,
    shim::{BinaryOperator, Comparator, Consumer, Function, Predicate},
    tunnel::{Carrier, Tunnel, TunnelCarrier},
};

/// A lazy pipeline over `I` whose stages may fail with `E`.
///
/// Elements are pulled one at a time, in encounter order, and only when a
/// terminal operation asks for them. The first failure stops the pipeline: no
/// element after it is evaluated.
pub struct GuardedSeq<I, E, C = TunnelCarrier<E>> {
    iter: I,
    tunnel: Tunnel<E, C>,
}

impl<I, E> GuardedSeq<I, E>
where
    I: Iterator,
    E: Send + 'static,
{
    pub fn wrap<S>(source: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self::with_tunnel(source, Tunnel::default())
    }
}

impl<I, E, C> GuardedSeq<I, E, C>
where
    I: Iterator,
    C: Carrier<E>,
{
    /// Wraps `source`, transporting failures in the carrier built by `tunnel`.
    pub fn with_tunnel<S>(source: S, tunnel: Tunnel<E, C>) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: source.into_iter(),
            tunnel,
        }
    }

    pub fn map<U, F>(self, function: F) -> GuardedSeq<impl Iterator<Item = U>, E, C>
    where
        F: Function<I::Item, U, E>,
    {
        let mapped = self.iter.map(self.tunnel.function(function));
        GuardedSeq {
            iter: mapped,
            tunnel: self.tunnel,
        }
    }

    pub fn filter<P>(self, predicate: P) -> GuardedSeq<impl Iterator<Item = I::Item>, E, C>
    where
        P: Predicate<I::Item, E>,
    {
        let tunnel = self.tunnel;
        let filtered = self.iter.filter(tunnel.predicate(predicate));
        GuardedSeq {
            iter: filtered,
            tunnel,
        }
    }

    pub fn flat_map<U, F>(
        self,
        function: F,
    ) -> GuardedSeq<impl Iterator<Item = U::Item>, E, C>
    where
        U: IntoIterator,
        F: Function<I::Item, U, E>,
    {
        let tunnel = self.tunnel;
        let flattened = self.iter.flat_map(tunnel.function(function));
        GuardedSeq {
            iter: flattened,
            tunnel,
        }
    }

    /// Observes each element as it passes through.
    pub fn peek<F>(self, mut observer: F) -> GuardedSeq<impl Iterator<Item = I::Item>, E, C>
    where
        F: FnMut(&I::Item) -> Result<(), E>,
    {
        let tunnel = self.tunnel;
        let peeked = self.iter.inspect(move |item| tunnel.pass(observer(item)));
        GuardedSeq {
            iter: peeked,
            tunnel,
        }
    }

    /// Drops elements equal to one seen before, keeping the first occurrence.
    pub fn distinct(self) -> GuardedSeq<impl Iterator<Item = I::Item>, E, C>
    where
        I::Item: Eq + Hash + Clone,
    {
        let mut seen = HashSet::new();
        let tunnel = self.tunnel;
        let unique = self.iter.filter(move |item| seen.insert(item.clone()));
        GuardedSeq {
            iter: unique,
            tunnel,
        }
    }

    pub fn limit(self, max_size: usize) -> GuardedSeq<impl Iterator<Item = I::Item>, E, C> {
        let tunnel = self.tunnel;
        GuardedSeq {
            iter: self.iter.take(max_size),
            tunnel,
        }
    }

    pub fn skip(self, n: usize) -> GuardedSeq<impl Iterator<Item = I::Item>, E, C> {
        let tunnel = self.tunnel;
        GuardedSeq {
            iter: self.iter.skip(n),
            tunnel,
        }
    }

    pub fn take_while<P>(self, predicate: P) -> GuardedSeq<impl Iterator<Item = I::Item>, E, C>
    where
        P: Predicate<I::Item, E>,
    {
        let tunnel = self.tunnel;
        let taken = self.iter.take_while(tunnel.predicate(predicate));
        GuardedSeq {
            iter: taken,
            tunnel,
        }
    }

    pub fn skip_while<P>(self, predicate: P) -> GuardedSeq<impl Iterator<Item = I::Item>, E, C>
    where
        P: Predicate<I::Item, E>,
    {
        let tunnel = self.tunnel;
        let skipped = self.iter.skip_while(tunnel.predicate(predicate));
        GuardedSeq {
            iter: skipped,
            tunnel,
        }
    }

    /// Sorts by natural order. The upstream is drained on the first pull.
    pub fn sorted(self) -> GuardedSeq<impl Iterator<Item = I::Item>, E, C>
    where
        I::Item: Ord,
    {
        let sorted = Sorted::new(self.iter, |a: &I::Item, b: &I::Item| a.cmp(b));
        GuardedSeq {
            iter: sorted,
            tunnel: self.tunnel,
        }
    }

    /// Sorts with `comparator`. The sort is stable and happens on the first
    /// pull; a failing comparison fails the whole pipeline.
    pub fn sorted_by<F>(self, comparator: F) -> GuardedSeq<impl Iterator<Item = I::Item>, E, C>
    where
        F: Comparator<I::Item, E>,
    {
        let tunnel = self.tunnel;
        let sorted = Sorted::new(self.iter, tunnel.comparator(comparator));
        GuardedSeq {
            iter: sorted,
            tunnel,
        }
    }

    pub fn count(self) -> Result<usize, E> {
        let Self { iter, tunnel } = self;
        tunnel.guard(move || iter.count())
    }

    pub fn find_first(self) -> Result<Option<I::Item>, E> {
        let Self { mut iter, tunnel } = self;
        tunnel.guard(move || iter.next())
    }

    /// Pipelines are sequential, so any element is the first one.
    pub fn find_any(self) -> Result<Option<I::Item>, E> {
        self.find_first()
    }

    pub fn any_match<P>(self, predicate: P) -> Result<bool, E>
    where
        P: Predicate<I::Item, E>,
    {
        let Self { mut iter, tunnel } = self;
        let mut test = tunnel.predicate(predicate);
        tunnel.guard(move || iter.any(|item| test(&item)))
    }

    pub fn all_match<P>(self, predicate: P) -> Result<bool, E>
    where
        P: Predicate<I::Item, E>,
    {
        let Self { mut iter, tunnel } = self;
        let mut test = tunnel.predicate(predicate);
        tunnel.guard(move || iter.all(|item| test(&item)))
    }

    pub fn none_match<P>(self, predicate: P) -> Result<bool, E>
    where
        P: Predicate<I::Item, E>,
    {
        self.any_match(predicate).map(|found| !found)
    }

    pub fn for_each<F>(self, consumer: F) -> Result<(), E>
    where
        F: Consumer<I::Item, E>,
    {
        let Self { iter, tunnel } = self;
        tunnel.guard(move || iter.for_each(tunnel.consumer(consumer)))
    }

    /// Same as [`GuardedSeq::for_each`]; pipelines always run in encounter order.
    pub fn for_each_ordered<F>(self, consumer: F) -> Result<(), E>
    where
        F: Consumer<I::Item, E>,
    {
        self.for_each(consumer)
    }

    /// Folds every element into `identity` with `operator`.
    pub fn reduce<F>(self, identity: I::Item, operator: F) -> Result<I::Item, E>
    where
        F: BinaryOperator<I::Item, E>,
    {
        let Self { iter, tunnel } = self;
        tunnel.guard(move || iter.fold(identity, tunnel.binary_operator(operator)))
    }

    /// Folds the elements into the first one. `None` for an empty pipeline.
    pub fn reduce_first<F>(self, operator: F) -> Result<Option<I::Item>, E>
    where
        F: BinaryOperator<I::Item, E>,
    {
        let Self { iter, tunnel } = self;
        tunnel.guard(move || iter.reduce(tunnel.binary_operator(operator)))
    }

    pub fn collect<B>(self) -> Result<B, E>
    where
        B: FromIterator<I::Item>,
    {
        let Self { iter, tunnel } = self;
        tunnel.guard(move || iter.collect())
    }

    /// Collects into a selective [`Outcome`].
    pub fn try_collect_outcome<B>(self) -> Outcome<B, E>
    where
        B: FromIterator<I::Item>,
    {
        Outcome::from_result(self.collect())
    }

    /// Largest element according to `comparator`. On ties the element met
    /// first wins, unlike `Iterator::max_by`.
    pub fn max<F>(self, comparator: F) -> Result<Option<I::Item>, E>
    where
        F: Comparator<I::Item, E>,
    {
        let Self { iter, tunnel } = self;
        let mut compare = tunnel.comparator(comparator);
        tunnel.guard(move || {
            iter.reduce(|best, item| match compare(&best, &item) {
                Ordering::Less => item,
                Ordering::Equal | Ordering::Greater => best,
            })
        })
    }

    /// Smallest element according to `comparator`, the first one on ties.
    pub fn min<F>(self, comparator: F) -> Result<Option<I::Item>, E>
    where
        F: Comparator<I::Item, E>,
    {
        let Self { iter, tunnel } = self;
        tunnel.guard(move || iter.min_by(tunnel.comparator(comparator)))
    }

    /// Largest element by natural order, the first one on ties.
    pub fn max_natural(self) -> Result<Option<I::Item>, E>
    where
        I::Item: Ord,
    {
        self.max(|a: &I::Item, b: &I::Item| Ok(a.cmp(b)))
    }

    pub fn min_natural(self) -> Result<Option<I::Item>, E>
    where
        I::Item: Ord,
    {
        let Self { iter, tunnel } = self;
        tunnel.guard(move || iter.min())
    }
}

/// Buffers the whole upstream and sorts it when the first element is pulled.
struct Sorted<I, F>
where
    I: Iterator,
{
    source: Option<I>,
    compare: F,
    buffer: std::vec::IntoIter<I::Item>,
}

impl<I, F> Sorted<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    fn new(source: I, compare: F) -> Self {
        Self {
            source: Some(source),
            compare,
            buffer: Vec::new().into_iter(),
        }
    }
}

impl<I, F> Iterator for Sorted<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(source) = self.source.take() {
            let mut items: Vec<I::Item> = source.collect();
            trace!("sorting {} buffered elements", items.len());
            items.sort_by(&mut self.compare);
            self.buffer = items.into_iter();
        }
        self.buffer.next()
    }
}
