use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// A shared shutdown flag. `terminate` flips the flag and wakes every
/// task currently waiting in [`Shutdown::listen`].
#[derive(Clone, Debug, Default)]
pub struct Shutdown {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    notify: Notify,
    terminated: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn terminate(&self) {
        self.inner.terminated.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.inner.terminated.load(Ordering::SeqCst)
    }

    /// Completes once [`terminate`] has been called. Completes
    /// immediately if it already was.
    ///
    /// [`terminate`]: Self::terminate
    pub async fn listen(&self) {
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);

        // Register before the flag check so a concurrent `terminate`
        // cannot slip between the check and the wait.
        notified.as_mut().enable();

        if self.is_terminated() {
            return;
        }

        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::Shutdown;

    #[tokio::test]
    async fn test_listen_after_terminate() {
        let shutdown = Shutdown::new();
        shutdown.terminate();

        // Must not hang.
        shutdown.listen().await;
        assert!(shutdown.is_terminated());
    }

    #[tokio::test]
    async fn test_listen_wakes_on_terminate() {
        let shutdown = Shutdown::new();

        let listener = {
            let shutdown = shutdown.clone();
            tokio::task::spawn(async move { shutdown.listen().await })
        };

        tokio::task::yield_now().await;
        shutdown.terminate();

        listener.await.unwrap();
    }
}
