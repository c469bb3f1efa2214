use std::{
    any::Any,
    fmt::{self, Debug, Display},
};

/// A panic captured by the universal catching scope.
///
/// Only the message survives the capture, which keeps outcomes holding a
/// `Panic` shareable between threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Panic {
    message: String,
}

impl Panic {
    pub fn new<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            message: message.into(),
        }
    }

    /// Extracts the message from a payload returned by `catch_unwind`.
    pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&str>() {
            msg.to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "<unknown panic>".to_string()
        };

        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raises the panic again on the current thread.
    ///
    /// Only the message was kept, so the new payload is always a `String`,
    /// whatever the original payload was.
    pub fn resume(self) -> ! {
        std::panic::resume_unwind(Box::new(self.message))
    }
}

impl Display for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.message)
    }
}

/// Cause type of outcomes that catch every fault.
///
/// Any `std::error::Error + Send + Sync + 'static` converts into `AnyFault`, so
/// `?` can be used inside universal shims. `AnyFault` itself deliberately does
/// not implement `std::error::Error`, the same way `anyhow::Error` does not.
#[derive(Debug)]
pub enum AnyFault {
    /// An error value returned by the evaluated code.
    Error(anyhow::Error),

    /// A panic raised by the evaluated code.
    Panic(Panic),
}

impl AnyFault {
    pub fn is_panic(&self) -> bool {
        matches!(self, AnyFault::Panic(_))
    }

    pub fn panic(&self) -> Option<&Panic> {
        match self {
            AnyFault::Panic(panic) => Some(panic),
            AnyFault::Error(_) => None,
        }
    }

    /// Returns the underlying error if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        match self {
            AnyFault::Error(err) => err.downcast_ref::<E>(),
            AnyFault::Panic(_) => None,
        }
    }

    /// Takes the underlying error back out if it is of type `E`.
    pub fn downcast<E>(self) -> Result<E, Self>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        match self {
            AnyFault::Error(err) => err.downcast::<E>().map_err(AnyFault::Error),
            panic @ AnyFault::Panic(_) => Err(panic),
        }
    }

    /// Turns the fault into an `anyhow::Error`, panics included.
    pub fn into_anyhow(self) -> anyhow::Error {
        match self {
            AnyFault::Error(err) => err,
            AnyFault::Panic(panic) => anyhow::Error::msg(panic),
        }
    }
}

impl Display for AnyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyFault::Error(err) => write!(f, "{}", err),
            AnyFault::Panic(panic) => write!(f, "{}", panic),
        }
    }
}

impl<E> From<E> for AnyFault
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        AnyFault::Error(anyhow::Error::new(err))
    }
}

impl From<Panic> for AnyFault {
    fn from(panic: Panic) -> Self {
        AnyFault::Panic(panic)
    }
}
