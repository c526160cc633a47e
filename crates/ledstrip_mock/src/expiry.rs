use std::future::Future;
use std::time::Duration;

use ledstrip_core::Token;
use tokio::task::JoinHandle;

/// Owner of the single pending one-shot expiry timer.
///
/// `schedule` aborts whatever was armed before it arms the new timer, but
/// abort is best-effort: a timer that already entered its callback will run
/// to completion. Correctness does not depend on the abort landing; the
/// callback is expected to carry a validity token and no-op when stale.
///
/// Arming requests themselves can arrive out of order when command handlers
/// race, so the scheduler remembers the token it last armed with and
/// refuses to let an older generation supersede a newer one.
#[derive(Debug, Default)]
pub struct ExpiryScheduler {
    pending: Option<JoinHandle<()>>,
    armed: Option<Token>,
}

impl ExpiryScheduler {
    pub fn new() -> Self {
        Self {
            pending: None,
            armed: None,
        }
    }

    /// Arm a one-shot timer for `token`, superseding any outstanding one.
    ///
    /// A request carrying a token older than the currently armed one is
    /// stale (its command was already superseded) and is dropped without
    /// touching the pending timer.
    pub fn schedule<F, Fut>(&mut self, token: Token, duration: Duration, on_fire: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.armed.map_or(false, |current| current > token) {
            return;
        }
        self.cancel();
        self.armed = Some(token);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            on_fire().await;
        }));
    }

    /// Best-effort cancellation of the outstanding timer, if any.
    ///
    /// Safe to call repeatedly; safe to race with the timer firing.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.armed = None;
    }
}

impl Drop for ExpiryScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
