use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

/// Outbound-channel seam.
///
/// The message bus is an external collaborator; the service only needs
/// "send this text". Implementations must not retry: delivery failures are
/// the bus's concern and are logged and dropped here.
pub trait DisplayPublisher: Send + Sync + 'static {
    type Error: fmt::Display + Send + Sync + 'static;

    fn publish<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>>;
}

/// Publisher wrapper that adds the diagnostic feed.
///
/// Emits one log line per distinct displayed value, not per command: the
/// feed remembers the last value it pushed and stays quiet on repeats.
pub struct DisplayFeed<P: DisplayPublisher> {
    sink: Arc<P>,
    last_logged: Mutex<String>,
}

impl<P: DisplayPublisher> DisplayFeed<P> {
    pub fn new(sink: Arc<P>) -> Self {
        Self {
            sink,
            last_logged: Mutex::new(String::new()),
        }
    }

    /// Forward `text` to the outbound channel; empty text means idle.
    pub async fn push(&self, text: &str) {
        let changed = {
            let mut last = self
                .last_logged
                .lock()
                .unwrap_or_else(|poison| poison.into_inner());
            let changed = *last != text;
            if changed {
                last.clear();
                last.push_str(text);
            }
            changed
        };

        if changed {
            if text.is_empty() {
                info!("display cleared");
            } else {
                info!("{text}");
            }
        }

        if let Err(err) = self.sink.publish(text).await {
            warn!("display publish failed: {err}");
        }
    }
}
