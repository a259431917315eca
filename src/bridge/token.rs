//! Callback correlation.
//!
//! The engine mints an opaque [`Cookie`] per outstanding request and expects
//! it echoed back with exactly one completion. Rather than a runtime
//! registry, the pairing is a move-only value: completing a [`Completion`]
//! consumes it, so a second completion for the same token does not compile.
//! Dropping one without completing is the only remaining hazard; every
//! bridge code path ends in exactly one `complete` call.

use crate::error::{ClientError, ClientResult};

/// Opaque per-request correlation handle supplied by the engine.
///
/// The bridge never interprets the value; it is echoed back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cookie(pub usize);

/// A one-shot completion bound to a [`Cookie`].
pub struct Completion<T> {
    cookie: Cookie,
    callback: Box<dyn FnOnce(Cookie, ClientResult<T>) + Send + 'static>,
}

impl<T> Completion<T> {
    pub fn new(
        cookie: Cookie,
        callback: impl FnOnce(Cookie, ClientResult<T>) + Send + 'static,
    ) -> Self {
        Self {
            cookie,
            callback: Box::new(callback),
        }
    }

    pub fn cookie(&self) -> Cookie {
        self.cookie
    }

    /// Deliver the outcome, consuming the completion.
    pub fn complete(self, result: ClientResult<T>) {
        (self.callback)(self.cookie, result);
    }

    pub fn succeed(self, value: T) {
        self.complete(Ok(value));
    }

    pub fn fail(self, error: ClientError) {
        self.complete(Err(error));
    }
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("cookie", &self.cookie)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_completion_echoes_cookie() {
        let delivered = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&delivered);

        let completion = Completion::new(Cookie(42), move |cookie, result: ClientResult<u64>| {
            assert_eq!(cookie, Cookie(42));
            assert_eq!(result, Ok(7));
            observed.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(completion.cookie(), Cookie(42));
        completion.succeed(7);
        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_completion_carries_failure() {
        let completion = Completion::new(Cookie(1), |_, result: ClientResult<u64>| {
            assert_eq!(result, Err(ClientError::Unavailable));
        });
        completion.fail(ClientError::Unavailable);
    }
}
