//! Running downloads in the background.

use std::future::Future;
use std::panic;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::ready;
use tokio::task::JoinHandle;

use crate::error::Error;

/// A handle to a download running on the tokio runtime.
///
/// The handle is a `Future` resolving to the result of the download. A UI thread that cannot
/// `.await` may poll [`is_finished`](Task::is_finished) instead and read the progress log
/// meanwhile.
///
/// Dropping the handle detaches the download. Use [`cancel`](Task::cancel) to stop it.
#[derive(Debug)]
pub struct Task<T, E> {
    handle: JoinHandle<Result<T, Error<E>>>,
}

impl<T, E> Task<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Spawns `future` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, Error<E>>> + Send + 'static,
    {
        Task {
            handle: tokio::spawn(future),
        }
    }
}

impl<T, E> Task<T, E> {
    /// Aborts the download. The handle then resolves to [`Error::Cancelled`] unless the download
    /// has already finished.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T, E> Future for Task<T, E> {
    type Output = Result<T, Error<E>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match ready!(Pin::new(&mut self.handle).poll(cx)) {
            Ok(result) => Poll::Ready(result),
            Err(e) if e.is_cancelled() => Poll::Ready(Err(Error::Cancelled)),
            Err(e) => panic::resume_unwind(e.into_panic()),
        }
    }
}
