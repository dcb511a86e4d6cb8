//! Error types

use std::error;
use std::fmt::{self, Display, Formatter};
use std::io;

use crate::timestamp::TimestampError;
use crate::tweet::StatusId;
use crate::types::StatusCode;

/// An error occurred while downloading or rendering a thread.
///
/// `E` is the error type of the underlying HTTP service.
#[derive(Debug)]
pub enum Error<E> {
    /// The requested Tweet was deleted or is not visible to the authenticated user.
    NotFound(StatusId),
    /// An unexpected HTTP status from the API, e.g. rate limiting or a server error.
    Http(StatusCode),
    /// An error from the underlying HTTP client.
    Service(E),
    /// The request could not be built, usually because of a malformed API base URL.
    Request(http::Error),
    /// An error occured while decoding a gzip response from the server.
    Gzip(io::Error),
    /// Twitter returned a response that does not deserialize into the expected type.
    Json(serde_json::Error),
    /// The thread's `created_at` timestamp could not be parsed.
    Timestamp(TimestampError),
    /// An error while writing the media archive.
    Archive(zip::result::ZipError),
    /// An I/O error while writing the output.
    Io(io::Error),
    /// The task was cancelled before it finished.
    Cancelled,
}

impl<E> Error<E> {
    /// Returns `true` if the requested Tweet does not exist or is inaccessible.
    pub fn is_not_found(&self) -> bool {
        matches!(*self, Error::NotFound(_))
    }

    /// Returns `true` if retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        match *self {
            Error::Http(status) => {
                status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            Error::Service(_) | Error::Gzip(_) => true,
            _ => false,
        }
    }
}

impl<E: error::Error + 'static> error::Error for Error<E> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use Error::*;

        match *self {
            NotFound(_) | Http(_) | Cancelled => None,
            Service(ref e) => Some(e),
            Request(ref e) => Some(e),
            Gzip(ref e) | Io(ref e) => Some(e),
            Json(ref e) => Some(e),
            Timestamp(ref e) => Some(e),
            Archive(ref e) => Some(e),
        }
    }
}

impl<E: Display> Display for Error<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Error::*;

        match *self {
            NotFound(id) => write!(f, "Tweet {} does not exist", id),
            Http(ref code) => write!(f, "HTTP error: {}", code),
            Service(ref e) => Display::fmt(e, f),
            Request(ref e) => Display::fmt(e, f),
            Gzip(ref e) => Display::fmt(e, f),
            Json(ref e) => Display::fmt(e, f),
            Timestamp(ref e) => Display::fmt(e, f),
            Archive(ref e) => Display::fmt(e, f),
            Io(ref e) => Display::fmt(e, f),
            Cancelled => f.write_str("cancelled"),
        }
    }
}

impl<E> From<TimestampError> for Error<E> {
    fn from(e: TimestampError) -> Self {
        Error::Timestamp(e)
    }
}

impl<E> From<zip::result::ZipError> for Error<E> {
    fn from(e: zip::result::ZipError) -> Self {
        Error::Archive(e)
    }
}

impl<E> From<io::Error> for Error<E> {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
