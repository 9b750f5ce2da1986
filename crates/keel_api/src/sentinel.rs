use keel_fs::Error;
use tracing::{debug, trace};

/// Logs an error that is about to be collapsed into a sentinel.
pub(crate) fn discard(op: &'static str, error: &Error) {
    if error.is_absent() {
        trace!(op, error = %error, "Filesystem operation failed");
    } else {
        debug!(op, error = %error, "Filesystem operation failed");
    }
}

pub(crate) trait OrSentinel<A> {
    /// Returns the value, or `sentinel` once the error has been logged.
    fn or_sentinel(self, op: &'static str, sentinel: A) -> A;
}

impl<A> OrSentinel<A> for keel_fs::Result<A> {
    fn or_sentinel(self, op: &'static str, sentinel: A) -> A {
        self.unwrap_or_else(|error| {
            discard(op, &error);
            sentinel
        })
    }
}

pub(crate) trait Succeeded {
    /// Collapses the outcome of a mutation into a boolean.
    fn succeeded(self, op: &'static str) -> bool;
}

impl Succeeded for keel_fs::Result<()> {
    fn succeeded(self, op: &'static str) -> bool {
        self.map(|()| true).or_sentinel(op, false)
    }
}
