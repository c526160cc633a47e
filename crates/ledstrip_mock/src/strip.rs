use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use ledstrip_core::{render, Colour, DisplayCore, Result, Token};
use tracing::debug;

use crate::expiry::ExpiryScheduler;
use crate::publisher::{DisplayFeed, DisplayPublisher};

/// Service façade for the mock LED strip.
///
/// Two paths mutate the display: inbound commands and the expiry timer.
/// Both serialize through the `state` mutex; the lock covers only the
/// compare/update/token-mint step, never the outbound publish, so a slow
/// bus cannot block a concurrent command. Publish still happens-after the
/// mutation that produced the text being published.
pub struct LedStrip<P: DisplayPublisher> {
    state: Mutex<DisplayCore>,
    feed: DisplayFeed<P>,
    scheduler: Mutex<ExpiryScheduler>,
    duration: Duration,
    running: AtomicBool,
}

impl<P: DisplayPublisher> LedStrip<P> {
    /// Build a strip that clears itself `duration` after the last command.
    pub fn new(sink: Arc<P>, duration: Duration) -> Self {
        Self {
            state: Mutex::new(DisplayCore::new()),
            feed: DisplayFeed::new(sink),
            scheduler: Mutex::new(ExpiryScheduler::new()),
            duration,
            running: AtomicBool::new(true),
        }
    }

    /// Handle one inbound command payload.
    ///
    /// Render, apply under the lock, restart the expiry countdown bound to
    /// the freshly minted token, then publish only on change. The timer is
    /// armed before the publish awaits: a handler suspended mid-publish
    /// must not re-arm after a newer command already did, and the
    /// scheduler's token ordering rejects any arming that still slips in
    /// late. An out-of-set colour label is rejected before any state is
    /// touched.
    pub async fn handle_command(self: &Arc<Self>, label: &str) -> Result<()> {
        let colour = Colour::parse(label)?;

        if !self.running.load(Ordering::Acquire) {
            // Racing a shutdown; the process is exiting, drop the command.
            return Ok(());
        }

        let text = render(colour);
        let applied = self.lock_state().apply(&text);

        let strip = Arc::clone(self);
        let token = applied.token;
        self.lock_scheduler()
            .schedule(token, self.duration, move || async move {
                strip.expire(token).await;
            });

        if applied.published {
            self.feed.push(&text).await;
        }

        Ok(())
    }

    /// Timer-fire path: clear the display iff `token` is still current.
    ///
    /// A stale token means a newer command superseded this timer; that is a
    /// normal event, not an error, and nothing is published.
    async fn expire(self: Arc<Self>, token: Token) {
        if !self.running.load(Ordering::Acquire) {
            return;
        }

        let expired = self.lock_state().expire(token);
        if expired {
            // Outside the lock this idle publish can be overtaken by a
            // newer command's block publish; the outbound channel is
            // last-value-wins, so the transient blank is tolerated.
            self.feed.push("").await;
        } else {
            debug!("stale expiry ignored");
        }
    }

    /// Stop handling commands and cancel any pending expiry.
    ///
    /// Idempotent and safe to call while a command or a timer fire is in
    /// flight: the running flag turns both into no-ops, and the token check
    /// covers a timer that already slipped past the abort.
    pub fn shutdown(&self) {
        let was_running = self.running.swap(false, Ordering::AcqRel);
        self.lock_scheduler().cancel();
        if was_running {
            debug!("led strip shut down");
        }
    }

    /// Last text on the outbound channel (empty when idle).
    pub fn current_text(&self) -> String {
        self.lock_state().text().to_string()
    }

    fn lock_state(&self) -> MutexGuard<'_, DisplayCore> {
        self.state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn lock_scheduler(&self) -> MutexGuard<'_, ExpiryScheduler> {
        self.scheduler
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}
