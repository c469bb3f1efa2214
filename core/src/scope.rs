use std::{
    fmt::Debug,
    hash::Hash,
    panic::{self, AssertUnwindSafe},
};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{fault::Panic, tunnel};

/// Runtime view of a catching scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    /// Only the declared failure family is captured.
    Selective,

    /// Every fault is captured, panics included.
    Universal,
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Selective {}
    impl Sealed for super::Universal {}
}

/// Marker trait implemented by the two catching scopes. Sealed: the set of
/// scopes is closed.
pub trait CatchScope:
    sealed::Sealed + Copy + Default + Debug + Eq + Hash + Send + Sync + 'static
{
    const KIND: ScopeKind;
}

/// Captures `Err` values only. Panics raised while evaluating a shim unwind
/// through the outcome machinery untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Selective;

/// Captures `Err` values and panics alike. Meant for narrow uses such as
/// checking that arbitrary code terminates without raising. Carriers raised by
/// a [`Tunnel`](crate::Tunnel) are not panics: they unwind on to their guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Universal;

impl CatchScope for Selective {
    const KIND: ScopeKind = ScopeKind::Selective;
}

impl CatchScope for Universal {
    const KIND: ScopeKind = ScopeKind::Universal;
}

/// How a scope evaluates a shim whose declared failure type is `E`.
///
/// Every combinator that calls back into user code goes through this hook,
/// which is what keeps the scope of an outcome fixed across a whole chain.
pub trait Catch<E>: CatchScope {
    fn catch<T, F>(shim: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>;
}

impl<E> Catch<E> for Selective {
    fn catch<T, F>(shim: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        shim()
    }
}

impl<E> Catch<E> for Universal
where
    E: From<Panic>,
{
    fn catch<T, F>(shim: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        match panic::catch_unwind(AssertUnwindSafe(shim)) {
            Ok(result) => result,
            Err(payload) if tunnel::is_tunneled(&*payload) => {
                trace!("universal scope resuming a tunnel carrier");
                panic::resume_unwind(payload)
            }
            Err(payload) => {
                let panic = Panic::from_payload(payload);
                debug!("universal scope captured a panic: {}", panic);
                Err(E::from(panic))
            }
        }
    }
}
