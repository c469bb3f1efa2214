use std::{
    fmt::{self, Debug},
    marker::PhantomData,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    fault::{AnyFault, Panic},
    outcome::Outcome,
    scope::{Catch, CatchScope, ScopeKind, Selective, Universal},
    shim::{Runnable, Supplier},
};

/// Value-less twin of [`Outcome`]: the result of a side effect.
#[derive(Clone, Copy, Hash)]
pub struct VoidOutcome<E, S = Selective> {
    inner: Result<(), E>,
    scope: PhantomData<S>,
}

impl<E> VoidOutcome<E, Selective> {
    pub fn success() -> Self {
        Self::settle(Ok(()))
    }

    pub fn failure(cause: E) -> Self {
        Self::settle(Err(cause))
    }

    pub fn from_result(result: Result<(), E>) -> Self {
        Self::settle(result)
    }

    /// Runs `runnable`. A returned `Err` becomes a failure, a panic unwinds.
    pub fn run<F>(runnable: F) -> Self
    where
        F: Runnable<E>,
    {
        Self::settle(Selective::catch(runnable))
    }

    pub fn widen(self) -> VoidOutcome<E, Universal> {
        VoidOutcome::settle(self.inner)
    }

    pub fn into_any_fault(self) -> VoidOutcome<AnyFault, Universal>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        VoidOutcome::settle(self.inner.map_err(AnyFault::from))
    }
}

impl<E> VoidOutcome<E, Universal> {
    pub fn success_any() -> Self {
        Self::settle(Ok(()))
    }

    pub fn failure_any(cause: E) -> Self {
        Self::settle(Err(cause))
    }

    pub fn from_result_any(result: Result<(), E>) -> Self {
        Self::settle(result)
    }

    /// Runs `runnable`, capturing returned errors and panics alike.
    pub fn run_any<F>(runnable: F) -> Self
    where
        F: Runnable<E>,
        E: From<Panic>,
    {
        Self::settle(Universal::catch(runnable))
    }
}

impl<E, S> VoidOutcome<E, S>
where
    S: CatchScope,
{
    pub(crate) fn settle(inner: Result<(), E>) -> Self {
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

    pub fn cause(&self) -> Option<&E> {
        self.inner.as_ref().err()
    }

    pub fn as_result(&self) -> Result<(), &E> {
        self.inner.as_ref().map(|_| ())
    }

    pub fn into_result(self) -> Result<(), E> {
        self.inner
    }

    pub fn unwrap_or_throw(self) -> Result<(), E> {
        self.inner
    }

    pub fn unwrap_or_throw_with<X, F>(self, transform: F) -> Result<(), X>
    where
        F: FnOnce(E) -> X,
    {
        self.inner.map_err(transform)
    }

    /// Hands the cause to `consumer`, if any, and ends the chain.
    pub fn or_consume_cause<X, F>(self, consumer: F) -> Result<(), X>
    where
        F: FnOnce(E) -> Result<(), X>,
    {
        match self.inner {
            Ok(()) => Ok(()),
            Err(cause) => consumer(cause),
        }
    }

    /// Replaces the cause of a failure. Successes pass through.
    ///
    /// The transform is a plain mapping and runs outside the catching scope:
    /// a panic inside it unwinds even under [`Universal`].
    pub fn or_map_cause<E2, F>(self, transform: F) -> VoidOutcome<E2, S>
    where
        F: FnOnce(E) -> E2,
    {
        VoidOutcome::settle(self.inner.map_err(transform))
    }

    pub fn into_outcome(self) -> Outcome<(), E, S> {
        Outcome::settle(self.inner)
    }
}

impl<E, S> VoidOutcome<E, S>
where
    S: Catch<E>,
{
    pub fn and_run<F>(self, runnable: F) -> Self
    where
        F: Runnable<E>,
    {
        match self.inner {
            Ok(()) => Self::settle(S::catch(runnable)),
            Err(cause) => Self::settle(Err(cause)),
        }
    }

    pub fn and_then<F>(self, next: F) -> Self
    where
        F: FnOnce() -> VoidOutcome<E, S>,
    {
        match self.inner {
            Ok(()) => Self::settle(S::catch(move || next().inner)),
            Err(cause) => Self::settle(Err(cause)),
        }
    }

    /// Produces a value after a success, turning the chain into an [`Outcome`].
    pub fn and_get<T, F>(self, supplier: F) -> Outcome<T, E, S>
    where
        F: Supplier<T, E>,
    {
        match self.inner {
            Ok(()) => Outcome::settle(S::catch(supplier)),
            Err(cause) => Outcome::settle(Err(cause)),
        }
    }

    /// Fail-fast merge; the left failure wins.
    pub fn and(self, other: VoidOutcome<E, S>) -> Self {
        match (self.inner, other.inner) {
            (Err(cause), _) | (Ok(()), Err(cause)) => Self::settle(Err(cause)),
            (Ok(()), Ok(())) => Self::settle(Ok(())),
        }
    }

    pub fn or<F, M>(self, alternative: F, merge: M) -> Self
    where
        F: Runnable<E>,
        M: FnOnce(E, E) -> E,
    {
        match self.inner {
            Ok(()) => Self::settle(Ok(())),
            Err(first) => match S::catch(alternative) {
                Ok(()) => Self::settle(Ok(())),
                Err(second) => Self::settle(S::catch(move || Err(merge(first, second)))),
            },
        }
    }
}

impl<E, S> From<VoidOutcome<E, S>> for Result<(), E> {
    fn from(outcome: VoidOutcome<E, S>) -> Self {
        outcome.inner
    }
}

impl<E> From<Result<(), E>> for VoidOutcome<E, Selective> {
    fn from(result: Result<(), E>) -> Self {
        Self::settle(result)
    }
}

impl<E, S> From<Outcome<(), E, S>> for VoidOutcome<E, S>
where
    S: CatchScope,
{
    fn from(outcome: Outcome<(), E, S>) -> Self {
        outcome.into_void()
    }
}

impl<E, S, S2> PartialEq<VoidOutcome<E, S2>> for VoidOutcome<E, S>
where
    E: PartialEq,
    S: CatchScope,
    S2: CatchScope,
{
    fn eq(&self, other: &VoidOutcome<E, S2>) -> bool {
        S::KIND == S2::KIND && self.inner == other.inner
    }
}

impl<E, S> Eq for VoidOutcome<E, S>
where
    E: Eq,
    S: CatchScope,
{
}

impl<E, S> Debug for VoidOutcome<E, S>
where
    E: Debug,
    S: CatchScope,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(()) => f.debug_tuple("Success").field(&S::KIND).finish(),
            Err(cause) => f.debug_tuple("Failure").field(cause).field(&S::KIND).finish(),
        }
    }
}

impl<E, S> Serialize for VoidOutcome<E, S>
where
    E: Serialize,
{
    fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error>
    where
        Z: Serializer,
    {
        self.inner.serialize(serializer)
    }
}

impl<'de, E, S> Deserialize<'de> for VoidOutcome<E, S>
where
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
