use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Buf, Bytes};
use futures_util::stream::{Stream, TryStreamExt};
use http_body::Body;
use pin_project_lite::pin_project;
use serde::{Deserialize, Deserializer};

/// Creates a string-backed enum with `AsRef<str>` and `Deserialize` impls.
///
/// Strings not listed become the `_ =>` variant so that new values on the Twitter side do not fail
/// the whole response.
macro_rules! str_enum {
    (
        $(#[$attr:meta])*
        pub enum $E:ident {
            $(
                $(#[$v_attr:meta])*
                $V:ident = $by:literal,
            )*
            _ => $U:ident,
        }
    ) => {
        $(#[$attr])*
        pub enum $E {
            $(
                $(#[$v_attr])*
                $V,
            )*
            $U(String),
        }

        impl std::convert::AsRef<str> for $E {
            fn as_ref(&self) -> &str {
                match *self {
                    $($E::$V => $by,)*
                    $E::$U(ref s) => s,
                }
            }
        }

        impl std::convert::From<&str> for $E {
            fn from(s: &str) -> Self {
                match s {
                    $($by => $E::$V,)*
                    _ => $E::$U(s.to_owned()),
                }
            }
        }

        impl std::fmt::Display for $E {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl<'de> serde::Deserialize<'de> for $E {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(d)?;
                Ok($E::from(&*s))
            }
        }
    }
}

pin_project! {
    /// Wraps `http_body::Body` to make it a `Stream`.
    pub struct HttpBodyAsStream<B> {
        #[pin]
        pub inner: B,
    }
}

impl<B: Body> HttpBodyAsStream<B> {
    pub fn new(inner: B) -> Self {
        HttpBodyAsStream { inner }
    }
}

impl<B: Body> Stream for HttpBodyAsStream<B> {
    type Item = Result<Bytes, B::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_data(cx).map(|opt| {
            opt.map(|result| result.map(|mut buf| buf.copy_to_bytes(buf.remaining())))
        })
    }
}

/// Reads a whole response body into memory.
pub async fn collect_body<B: Body>(body: B) -> Result<Vec<u8>, B::Error> {
    HttpBodyAsStream::new(body)
        .try_fold(Vec::new(), |mut vec, chunk| {
            vec.extend_from_slice(&chunk);
            async { Ok(vec) }
        })
        .await
}

/// Deserializes `null` as `T::default()`.
pub fn deserialize_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::deserialize(d).map(|o| o.unwrap_or_default())
}
