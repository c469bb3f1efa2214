//! Typed outcomes for fallible code.
//!
//! An [`Outcome`] holds either a value or the cause of a failure and is
//! created under one of two catching scopes: [`Selective`] captures only the
//! declared error type, [`Universal`] captures panics as well. Combinators
//! (`map`, `and_then`, `and`, `or`, ...) keep the scope of their receiver.
//!
//! [`Tunnel`] moves declared failures through code that only takes plain
//! closures, and [`GuardedSeq`] builds lazy pipelines on top of it.
pub mod fault;
pub mod outcome;
pub mod scope;
pub mod sequence;
pub mod shim;
pub mod testing;
pub mod tunnel;
pub mod void;

pub use fault::{AnyFault, Panic};
pub use outcome::Outcome;
pub use scope::{Catch, CatchScope, ScopeKind, Selective, Universal};
pub use sequence::GuardedSeq;
pub use tunnel::{Carrier, Tunnel, TunnelCarrier};
pub use void::VoidOutcome;
