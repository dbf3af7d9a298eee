use std::fmt;
use std::fmt::Formatter;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
struct Repr {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {:?}: {}", self.kind, self.message)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub enum ErrorKind {
    /// A caller broke the contract of a stream handle, e.g. reading an unbound slot
    InvalidArgument,
    /// Walked off the end of a stream, or asked for a negative index
    IndexOutOfRange,
    /// A delayed value was forced again while its own producer was still running
    ReentrantForce,
    Generic,
}

impl ErrorKind {
    pub fn to_error_code(&self) -> &str {
        use ErrorKind::*;
        match self {
            InvalidArgument => "E01",
            IndexOutOfRange => "E02",
            ReentrantForce => "E03",
            Generic => "E04",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The single error type of the crate.
///
/// Errors are `Clone` so that a failed producer can be memoized and the identical
/// error handed back on every subsequent force.
#[derive(Debug, Error, Clone, PartialEq)]
pub struct StreamErr {
    repr: Repr,
}

impl fmt::Display for StreamErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repr)
    }
}

impl StreamErr {
    pub fn new(kind: ErrorKind, message: String) -> Self {
        StreamErr {
            repr: Repr { kind, message },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.repr.kind
    }

    pub fn message(&self) -> &str {
        &self.repr.message
    }

    pub fn to_error_code(&self) -> &str {
        self.repr.kind.to_error_code()
    }
}

#[macro_export]
macro_rules! streamerr {
    ($type:ident => $fmt:expr, $($arg:tt)+) => {
        Err($crate::rerrs::StreamErr::new($crate::rerrs::ErrorKind::$type, format!($fmt, $($arg)+)))
    };
    ($type:ident => $thing:expr) => {
        Err($crate::rerrs::StreamErr::new($crate::rerrs::ErrorKind::$type, ($thing).to_string()))
    };
}

#[macro_export]
macro_rules! stop {
    ($type:ident => $fmt:expr, $($arg:tt)+) => {
        return Err($crate::rerrs::StreamErr::new($crate::rerrs::ErrorKind::$type, format!($fmt, $($arg)+)))
    };
    ($type:ident => $thing:expr) => {
        return Err($crate::rerrs::StreamErr::new($crate::rerrs::ErrorKind::$type, ($thing).to_string()))
    };
}
