//! Carries declared failures through code that can only propagate panics.
//!
//! Plenty of machinery takes plain closures: iterator adapters, `sort_by`,
//! callbacks of other libraries. A [`Tunnel`] turns a shim returning
//! `Result<_, E>` into a closure returning the bare value. When the shim fails,
//! the closure unwinds with a carrier holding the cause; [`Tunnel::guard`] at
//! the owning call site catches the carrier and hands the cause back as `Err`.
//!
//! ```
//! use outcome_core::Tunnel;
//!
//! let tunnel = Tunnel::<String>::default();
//! let mut values = vec![3, 1, 2];
//!
//! let sorted = tunnel.guard(|| {
//!     values.sort_by(tunnel.comparator(|a: &i32, b: &i32| Ok(a.cmp(b))));
//! });
//!
//! assert!(sorted.is_ok());
//! assert_eq!(values, vec![1, 2, 3]);
//! ```
//!
//! Carriers travel as unwinding payloads, so the tunnel needs `panic = "unwind"`.
//! Raising a carrier does not run the panic hook. The universal scope never
//! captures a carrier: it keeps unwinding until a guard claims it.
use std::{
    any::{self, Any},
    cmp::Ordering,
    fmt::{self, Debug},
    panic::{self, AssertUnwindSafe},
};

use log::trace;

use crate::shim::{
    BiFunction, BinaryOperator, Comparator, Consumer, Function, Predicate, Runnable, Supplier,
};

/// Unwinding payload that holds exactly one declared cause.
pub trait Carrier<E>: Any + Send {
    fn into_cause(self) -> E;
}

/// Default carrier.
pub struct TunnelCarrier<E> {
    cause: E,
}

impl<E> TunnelCarrier<E> {
    pub fn new(cause: E) -> Self {
        Self { cause }
    }
}

impl<E> Carrier<E> for TunnelCarrier<E>
where
    E: Send + 'static,
{
    fn into_cause(self) -> E {
        self.cause
    }
}

impl<E> Debug for TunnelCarrier<E>
where
    E: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TunnelCarrier")
            .field("cause", &self.cause)
            .finish()
    }
}

/// The payload every tunnel unwinds with, holding the boxed carrier.
struct Tunneled(Box<dyn Any + Send>);

/// Whether `payload` was raised by a tunnel.
pub(crate) fn is_tunneled(payload: &(dyn Any + Send)) -> bool {
    payload.is::<Tunneled>()
}

/// Adapter between shims declaring the failure type `E` and code that only
/// understands panics. `wrap` builds the carrier a cause travels in.
pub struct Tunnel<E, C = TunnelCarrier<E>> {
    wrap: fn(E) -> C,
}

impl<E, C> Clone for Tunnel<E, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, C> Copy for Tunnel<E, C> {}

impl<E, C> Debug for Tunnel<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tunnel")
            .field("cause", &any::type_name::<E>())
            .field("carrier", &any::type_name::<C>())
            .finish()
    }
}

impl<E> Default for Tunnel<E>
where
    E: Send + 'static,
{
    fn default() -> Self {
        Self::new(TunnelCarrier::new)
    }
}

impl<E, C> Tunnel<E, C>
where
    C: Carrier<E>,
{
    pub fn new(wrap: fn(E) -> C) -> Self {
        Self { wrap }
    }

    fn raise(self, cause: E) -> ! {
        trace!(
            "tunneling {} through {}",
            any::type_name::<E>(),
            any::type_name::<C>()
        );
        panic::resume_unwind(Box::new(Tunneled(Box::new((self.wrap)(cause)))))
    }

    /// Returns the value of `result` or unwinds with its cause.
    pub(crate) fn pass<T>(self, result: Result<T, E>) -> T {
        match result {
            Ok(value) => value,
            Err(cause) => self.raise(cause),
        }
    }

    pub fn supplier<T, F>(self, supplier: F) -> impl FnOnce() -> T
    where
        F: Supplier<T, E>,
    {
        move || self.pass(supplier())
    }

    pub fn runnable<F>(self, runnable: F) -> impl FnOnce()
    where
        F: Runnable<E>,
    {
        move || self.pass(runnable())
    }

    pub fn function<A, R, F>(self, mut function: F) -> impl FnMut(A) -> R
    where
        F: Function<A, R, E>,
    {
        move |a| self.pass(function(a))
    }

    pub fn bi_function<A, B, R, F>(self, mut function: F) -> impl FnMut(A, B) -> R
    where
        F: BiFunction<A, B, R, E>,
    {
        move |a, b| self.pass(function(a, b))
    }

    pub fn binary_operator<T, F>(self, mut operator: F) -> impl FnMut(T, T) -> T
    where
        F: BinaryOperator<T, E>,
    {
        move |left, right| self.pass(operator(left, right))
    }

    pub fn consumer<A, F>(self, mut consumer: F) -> impl FnMut(A)
    where
        F: Consumer<A, E>,
    {
        move |a| self.pass(consumer(a))
    }

    pub fn predicate<A, F>(self, mut predicate: F) -> impl FnMut(&A) -> bool
    where
        F: Predicate<A, E>,
    {
        move |a: &A| self.pass(predicate(a))
    }

    pub fn comparator<A, F>(self, mut comparator: F) -> impl FnMut(&A, &A) -> Ordering
    where
        F: Comparator<A, E>,
    {
        move |left: &A, right: &A| self.pass(comparator(left, right))
    }

    /// Calls `supplier` right away, unwinding with a carrier if it fails.
    pub fn invoke<T, F>(self, supplier: F) -> T
    where
        F: Supplier<T, E>,
    {
        self.pass(supplier())
    }

    /// Runs `body`, turning a carrier raised by this tunnel back into the
    /// original cause. Panics that are not carriers resume unchanged.
    pub fn guard<R, F>(self, body: F) -> Result<R, E>
    where
        F: FnOnce() -> R,
    {
        match panic::catch_unwind(AssertUnwindSafe(body)) {
            Ok(value) => Ok(value),
            Err(payload) => match self.recover(payload) {
                Ok(cause) => Err(cause),
                Err(foreign) => panic::resume_unwind(foreign),
            },
        }
    }

    /// Takes the cause out of a payload caught with `catch_unwind`, if this
    /// tunnel's carrier is in it. Any other payload is handed back untouched.
    pub fn recover(self, payload: Box<dyn Any + Send>) -> Result<E, Box<dyn Any + Send>> {
        let tunneled = payload.downcast::<Tunneled>()?;
        match tunneled.0.downcast::<C>() {
            Ok(carrier) => {
                trace!("unwrapping {} from carrier", any::type_name::<E>());
                Ok((*carrier).into_cause())
            }
            Err(other) => Err(Box::new(Tunneled(other))),
        }
    }
}
