use std::{
    fmt::{self, Debug},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    fault::{AnyFault, Panic},
    scope::{Catch, CatchScope, ScopeKind, Selective, Universal},
    shim::{Runnable, Supplier},
    void::VoidOutcome,
};

/// Either a success holding a `T` or a failure holding the cause `E`.
///
/// `S` is the catching scope the outcome was created under. It decides what
/// the combinators capture when they call back into user code and it never
/// changes along a chain, except through the one-way [`Outcome::widen`].
///
/// ```
/// use outcome_core::Outcome;
///
/// let doubled = Outcome::<i32, std::num::ParseIntError>::of(|| "5".parse::<i32>())
///     .map(|x| Ok(x * 2))
///     .unwrap_or_throw();
///
/// assert_eq!(doubled, Ok(10));
/// ```
#[derive(Clone, Copy, Hash)]
pub struct Outcome<T, E, S = Selective> {
    inner: Result<T, E>,
    scope: PhantomData<S>,
}

impl<T, E> Outcome<T, E, Selective> {
    pub fn success(value: T) -> Self {
        Self::settle(Ok(value))
    }

    pub fn failure(cause: E) -> Self {
        Self::settle(Err(cause))
    }

    pub fn from_result(result: Result<T, E>) -> Self {
        Self::settle(result)
    }

    /// Evaluates `supplier`. A returned `Err` becomes a failure; a panic is not
    /// caught and unwinds out of this call.
    pub fn of<F>(supplier: F) -> Self
    where
        F: Supplier<T, E>,
    {
        Self::settle(Selective::catch(supplier))
    }

    /// Moves the outcome to the universal scope. There is no way back: a cause
    /// captured under the universal scope may be a panic.
    pub fn widen(self) -> Outcome<T, E, Universal> {
        Outcome::settle(self.inner)
    }

    /// Widens and erases the cause into an [`AnyFault`].
    pub fn into_any_fault(self) -> Outcome<T, AnyFault, Universal>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Outcome::settle(self.inner.map_err(AnyFault::from))
    }
}

impl<T, E> Outcome<T, E, Universal> {
    pub fn success_any(value: T) -> Self {
        Self::settle(Ok(value))
    }

    pub fn failure_any(cause: E) -> Self {
        Self::settle(Err(cause))
    }

    pub fn from_result_any(result: Result<T, E>) -> Self {
        Self::settle(result)
    }

    /// Evaluates `supplier`, capturing returned errors and panics alike.
    pub fn of_any<F>(supplier: F) -> Self
    where
        F: Supplier<T, E>,
        E: From<Panic>,
    {
        Self::settle(Universal::catch(supplier))
    }
}

impl<T, E, S> Outcome<T, E, S>
where
    S: CatchScope,
{
    pub(crate) fn settle(inner: Result<T, E>) -> Self {
        Self {
            inner,
            scope: PhantomData,
        }
    }

    pub fn is_success(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.inner.is_err()
    }

    pub fn scope(&self) -> ScopeKind {
        S::KIND
    }

    pub fn value(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    pub fn cause(&self) -> Option<&E> {
        self.inner.as_ref().err()
    }

    pub fn as_result(&self) -> Result<&T, &E> {
        self.inner.as_ref()
    }

    pub fn into_result(self) -> Result<T, E> {
        self.inner
    }

    /// Leaves the algebra: the value, or the original cause as `Err`.
    pub fn unwrap_or_throw(self) -> Result<T, E> {
        self.inner
    }

    /// Like [`Outcome::unwrap_or_throw`] with the cause mapped first.
    pub fn unwrap_or_throw_with<X, F>(self, transform: F) -> Result<T, X>
    where
        F: FnOnce(E) -> X,
    {
        self.inner.map_err(transform)
    }

    /// The value, or one derived from the cause.
    pub fn unwrap_or_transform<F>(self, transform: F) -> T
    where
        F: FnOnce(E) -> T,
    {
        self.inner.unwrap_or_else(transform)
    }

    pub fn to_optional_ignoring_cause(self) -> Option<T> {
        self.inner.ok()
    }

    /// Hands the cause to `consumer` and ends the chain. Successes yield their
    /// value and skip `consumer`.
    pub fn or_consume_cause<X, F>(self, consumer: F) -> Result<Option<T>, X>
    where
        F: FnOnce(E) -> Result<(), X>,
    {
        match self.inner {
            Ok(value) => Ok(Some(value)),
            Err(cause) => {
                consumer(cause)?;
                Ok(None)
            }
        }
    }

    /// Replaces the cause of a failure. Successes pass through.
    ///
    /// The transform is a plain mapping and runs outside the catching scope:
    /// a panic inside it unwinds even under [`Universal`].
    pub fn or_map_cause<E2, F>(self, transform: F) -> Outcome<T, E2, S>
    where
        F: FnOnce(E) -> E2,
    {
        Outcome::settle(self.inner.map_err(transform))
    }

    /// Drops the value, keeping the scope and the cause.
    pub fn into_void(self) -> VoidOutcome<E, S> {
        VoidOutcome::settle(self.inner.map(|_| ()))
    }
}

impl<T, E, S> Outcome<T, E, S>
where
    S: Catch<E>,
{
    /// Applies `transform` to a success. A failure keeps its cause and
    /// `transform` is never called.
    pub fn map<U, F>(self, transform: F) -> Outcome<U, E, S>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        match self.inner {
            Ok(value) => Outcome::settle(S::catch(move || transform(value))),
            Err(cause) => Outcome::settle(Err(cause)),
        }
    }

    /// Chains an outcome-producing step after a success.
    pub fn and_then<U, F>(self, next: F) -> Outcome<U, E, S>
    where
        F: FnOnce(T) -> Outcome<U, E, S>,
    {
        match self.inner {
            Ok(value) => Outcome::settle(S::catch(move || next(value).inner)),
            Err(cause) => Outcome::settle(Err(cause)),
        }
    }

    /// Runs `consumer` on the value of a success. On a successful run the
    /// outcome is returned unchanged.
    pub fn and_consume<F>(self, consumer: F) -> Self
    where
        F: FnOnce(&T) -> Result<(), E>,
    {
        match self.inner {
            Ok(value) => Self::settle(S::catch(|| consumer(&value)).map(|()| value)),
            Err(cause) => Self::settle(Err(cause)),
        }
    }

    /// Runs `runnable` after a success. On a successful run the outcome is
    /// returned unchanged.
    pub fn and_run<F>(self, runnable: F) -> Self
    where
        F: Runnable<E>,
    {
        match self.inner {
            Ok(value) => Self::settle(S::catch(runnable).map(|()| value)),
            Err(cause) => Self::settle(Err(cause)),
        }
    }

    /// Merges two outcomes. The left failure wins over the right one and
    /// `merge` only runs when both sides succeeded.
    pub fn and<U, R, F>(self, other: Outcome<U, E, S>, merge: F) -> Outcome<R, E, S>
    where
        F: FnOnce(T, U) -> Result<R, E>,
    {
        match (self.inner, other.inner) {
            (Err(cause), _) | (Ok(_), Err(cause)) => Outcome::settle(Err(cause)),
            (Ok(left), Ok(right)) => Outcome::settle(S::catch(move || merge(left, right))),
        }
    }

    /// Recovers a failure by evaluating `alternative`. When the alternative
    /// fails too, both causes are combined with `merge`, first cause first.
    pub fn or<F, M>(self, alternative: F, merge: M) -> Self
    where
        F: Supplier<T, E>,
        M: FnOnce(E, E) -> E,
    {
        match self.inner {
            Ok(value) => Self::settle(Ok(value)),
            Err(first) => match S::catch(alternative) {
                Ok(value) => Self::settle(Ok(value)),
                Err(second) => Self::settle(S::catch(move || Err(merge(first, second)))),
            },
        }
    }
}

impl<T, E, S> From<Outcome<T, E, S>> for Result<T, E> {
    fn from(outcome: Outcome<T, E, S>) -> Self {
        outcome.inner
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E, Selective> {
    fn from(result: Result<T, E>) -> Self {
        Self::settle(result)
    }
}

/// Outcomes are equal when their content is equal and they were created under
/// the same scope.
impl<T, E, S, S2> PartialEq<Outcome<T, E, S2>> for Outcome<T, E, S>
where
    T: PartialEq,
    E: PartialEq,
    S: CatchScope,
    S2: CatchScope,
{
    fn eq(&self, other: &Outcome<T, E, S2>) -> bool {
        S::KIND == S2::KIND && self.inner == other.inner
    }
}

impl<T, E, S> Eq for Outcome<T, E, S>
where
    T: Eq,
    E: Eq,
    S: CatchScope,
{
}

impl<T, E, S> Debug for Outcome<T, E, S>
where
    T: Debug,
    E: Debug,
    S: CatchScope,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(value) => f.debug_tuple("Success").field(value).field(&S::KIND).finish(),
            Err(cause) => f.debug_tuple("Failure").field(cause).field(&S::KIND).finish(),
        }
    }
}

/// Serialized the same way as `Result`, the scope lives in the type.
impl<T, E, S> Serialize for Outcome<T, E, S>
where
    T: Serialize,
    E: Serialize,
{
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<'de, T, E, S> Deserialize<'de> for Outcome<T, E, S>
where
    T: Deserialize<'de>,
    E: Deserialize<'de>,
    S: CatchScope,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Result::deserialize(deserializer).map(Self::settle)
    }
}
