//! Verification helpers built on the universal scope.
//!
//! A harness checking that arbitrary code terminates cleanly has to observe
//! faults it knows nothing about, panics included, which is what the
//! universal scope is for. Nothing else in this crate uses it implicitly.
use log::debug;

use crate::{fault::AnyFault, scope::Universal, void::VoidOutcome};

/// Runs `body` and records whatever it raised.
pub fn completes<F, X>(body: F) -> VoidOutcome<AnyFault, Universal>
where
    F: FnOnce() -> Result<(), X>,
    X: Into<AnyFault>,
{
    VoidOutcome::run_any(move || body().map_err(Into::into))
}

/// Panics with the captured fault unless `body` completes without raising.
pub fn assert_completes<F, X>(body: F)
where
    F: FnOnce() -> Result<(), X>,
    X: Into<AnyFault>,
{
    if let Some(fault) = completes(body).cause() {
        panic!("expected code to complete, but it raised: {}", fault);
    }
}

/// Returns the fault raised by `body`, panicking if it completed.
pub fn assert_raises<F, X>(body: F) -> AnyFault
where
    F: FnOnce() -> Result<(), X>,
    X: Into<AnyFault>,
{
    match completes(body).into_result() {
        Ok(()) => panic!("expected code to raise, but it completed"),
        Err(fault) => {
            debug!("captured expected fault: {}", fault);
            fault
        }
    }
}
