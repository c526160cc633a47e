use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use ledstrip_core::StripError;
use ledstrip_mock::publisher::DisplayPublisher;
use ledstrip_mock::strip::LedStrip;
use tokio::sync::mpsc;
use tokio::time::timeout;

struct TestPublisher {
    tx: mpsc::UnboundedSender<String>,
}

impl DisplayPublisher for TestPublisher {
    type Error = String;

    fn publish<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>> {
        let tx = self.tx.clone();
        let text = text.to_string();
        Box::pin(async move { tx.send(text).map_err(|err| err.to_string()) })
    }
}

fn test_strip(duration: Duration) -> (Arc<LedStrip<TestPublisher>>, mpsc::UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let strip = Arc::new(LedStrip::new(Arc::new(TestPublisher { tx }), duration));
    (strip, rx)
}

async fn recv_within(
    rx: &mut mpsc::UnboundedReceiver<String>,
    window: Duration,
) -> Option<String> {
    timeout(window, rx.recv()).await.ok().flatten()
}

#[tokio::test(start_paused = true)]
async fn idle_round_trip_clears_exactly_once() {
    let (strip, mut rx) = test_strip(Duration::from_secs(3));

    strip.handle_command("red").await.unwrap();
    let block = recv_within(&mut rx, Duration::from_secs(1))
        .await
        .expect("red block published");
    assert!(block.contains("red"));

    let cleared = recv_within(&mut rx, Duration::from_secs(5))
        .await
        .expect("expiry publishes idle");
    assert_eq!(cleared, "");

    // Exactly once: nothing further arrives.
    assert!(recv_within(&mut rx, Duration::from_secs(5)).await.is_none());

    // The strip keeps working after an expiry.
    strip.handle_command("blue").await.unwrap();
    let block = recv_within(&mut rx, Duration::from_secs(1))
        .await
        .expect("blue block published");
    assert!(block.contains("blue"));
}

#[tokio::test(start_paused = true)]
async fn debounce_restarts_countdown_from_the_last_command() {
    let (strip, mut rx) = test_strip(Duration::from_secs(3));

    strip.handle_command("red").await.unwrap();
    let _ = recv_within(&mut rx, Duration::from_secs(1)).await.unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;
    strip.handle_command("red").await.unwrap();

    // The first timer's deadline passes inside this window; the resend must
    // have defused it, whether or not its task was still alive.
    assert!(
        recv_within(&mut rx, Duration::from_secs(2)).await.is_none(),
        "no expiry timed from the first command"
    );

    // The only expiry fires relative to the second command.
    let cleared = recv_within(&mut rx, Duration::from_secs(2))
        .await
        .expect("expiry timed from the last command");
    assert_eq!(cleared, "");
}

#[tokio::test(start_paused = true)]
async fn repeated_colour_publishes_once_but_still_expires_later() {
    let (strip, mut rx) = test_strip(Duration::from_secs(3));

    strip.handle_command("red").await.unwrap();
    strip.handle_command("red").await.unwrap();

    let first = recv_within(&mut rx, Duration::from_secs(1)).await.unwrap();
    assert!(first.contains("red"));

    // The second command produced no outbound update; the next event on the
    // channel is the expiry itself.
    let next = recv_within(&mut rx, Duration::from_secs(5))
        .await
        .expect("expiry still arrives");
    assert_eq!(next, "");
}

#[tokio::test(start_paused = true)]
async fn newer_command_preempts_a_pending_expiry() {
    let (strip, mut rx) = test_strip(Duration::from_secs(3));

    strip.handle_command("red").await.unwrap();
    let red = recv_within(&mut rx, Duration::from_secs(1)).await.unwrap();
    assert!(red.contains("red"));

    tokio::time::sleep(Duration::from_secs(1)).await;
    strip.handle_command("blue").await.unwrap();
    let blue = recv_within(&mut rx, Duration::from_secs(1)).await.unwrap();
    assert!(blue.contains("blue"));

    // t=3 (red's deadline) falls inside this window; red's expiry must not
    // clear blue's display.
    assert!(
        recv_within(&mut rx, Duration::from_millis(2500)).await.is_none(),
        "superseded expiry must not publish"
    );

    // Blue's own expiry lands around t=4.
    let cleared = recv_within(&mut rx, Duration::from_secs(2))
        .await
        .expect("blue's expiry fires");
    assert_eq!(cleared, "");
}

/// Publisher whose first publish stalls, so the first command handler
/// suspends mid-publish while a second command races past it.
struct StallingPublisher {
    tx: mpsc::UnboundedSender<String>,
    stalled_once: std::sync::atomic::AtomicBool,
}

impl DisplayPublisher for StallingPublisher {
    type Error = String;

    fn publish<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>> {
        let tx = self.tx.clone();
        let text = text.to_string();
        let stall = !self
            .stalled_once
            .swap(true, std::sync::atomic::Ordering::SeqCst);
        Box::pin(async move {
            if stall {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            tx.send(text).map_err(|err| err.to_string())
        })
    }
}

#[tokio::test(start_paused = true)]
async fn command_racing_a_slow_publish_still_reverts_to_idle() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let publisher = Arc::new(StallingPublisher {
        tx,
        stalled_once: std::sync::atomic::AtomicBool::new(false),
    });
    let strip = Arc::new(LedStrip::new(publisher, Duration::from_secs(3)));

    // Red's handler stalls inside its publish; blue lands meanwhile and
    // arms the live timer. Whatever red does when it resumes, blue's
    // expiry must survive and the display must still clear.
    let red_strip = Arc::clone(&strip);
    let red = tokio::spawn(async move { red_strip.handle_command("red").await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    strip.handle_command("blue").await.unwrap();
    red.await.unwrap().unwrap();

    let mut saw_blue = false;
    loop {
        let event = recv_within(&mut rx, Duration::from_secs(10))
            .await
            .expect("display reverts to idle after concurrent commands");
        if event.is_empty() {
            break;
        }
        saw_blue |= event.contains("blue");
    }
    assert!(saw_blue, "blue block published before the clear");
    assert_eq!(strip.current_text(), "");
}

#[tokio::test(start_paused = true)]
async fn clear_command_on_active_strip_publishes_idle() {
    let (strip, mut rx) = test_strip(Duration::from_secs(3));

    strip.handle_command("green").await.unwrap();
    let _ = recv_within(&mut rx, Duration::from_secs(1)).await.unwrap();

    strip.handle_command("").await.unwrap();
    let cleared = recv_within(&mut rx, Duration::from_secs(1))
        .await
        .expect("clear command publishes idle");
    assert_eq!(cleared, "");
}

#[tokio::test(start_paused = true)]
async fn out_of_set_label_is_rejected_without_output() {
    let (strip, mut rx) = test_strip(Duration::from_secs(3));

    let err = strip.handle_command("ultraviolet").await.unwrap_err();
    assert!(matches!(err, StripError::InvalidColour { .. }));

    assert!(recv_within(&mut rx, Duration::from_secs(5)).await.is_none());
    assert_eq!(strip.current_text(), "");
}

#[tokio::test(start_paused = true)]
async fn shutdown_with_pending_timer_is_quiet_and_idempotent() {
    let (strip, mut rx) = test_strip(Duration::from_secs(3));

    strip.handle_command("purple").await.unwrap();
    let _ = recv_within(&mut rx, Duration::from_secs(1)).await.unwrap();

    strip.shutdown();
    strip.shutdown();

    // The pending expiry must not produce a delayed publish.
    assert!(recv_within(&mut rx, Duration::from_secs(6)).await.is_none());

    // Commands after shutdown are dropped without error or output.
    strip.handle_command("red").await.unwrap();
    assert!(recv_within(&mut rx, Duration::from_secs(1)).await.is_none());
}
