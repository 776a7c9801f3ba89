//! Keep-only-latest frame feed between the recognizer and the pipeline.
//!
//! The producer may recognize frames faster than the pipeline consumes them.
//! [`FrameSender::publish`] overwrites any frame that has not been picked up
//! yet, so the consumer always sees the newest frame and never a backlog.

use tokio::sync::watch;

use super::event::RecognizedTextEvent;

/// Create a connected sender/receiver pair.
///
/// ```rust
/// use currency_lens::pipeline::{frame_feed, RecognizedTextEvent};
///
/// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// rt.block_on(async {
///     let (tx, mut rx) = frame_feed();
///     tx.publish("9.99".into());
///     tx.publish("12.50".into());
///     drop(tx);
///
///     assert_eq!(rx.next().await, Some(RecognizedTextEvent::new("12.50")));
///     assert_eq!(rx.next().await, None);
/// });
/// ```
pub fn frame_feed() -> (FrameSender, FrameReceiver) {
    let (tx, rx) = watch::channel(None);
    (FrameSender { tx }, FrameReceiver { rx })
}

/// Producer side of the feed.
#[derive(Debug)]
pub struct FrameSender {
    tx: watch::Sender<Option<RecognizedTextEvent>>,
}

impl FrameSender {
    /// Offer a frame, replacing any frame still waiting.
    ///
    /// Returns `false` once the receiver has been dropped.
    pub fn publish(&self, event: RecognizedTextEvent) -> bool {
        self.tx.send(Some(event)).is_ok()
    }
}

/// Consumer side of the feed.
#[derive(Debug)]
pub struct FrameReceiver {
    rx: watch::Receiver<Option<RecognizedTextEvent>>,
}

impl FrameReceiver {
    /// Wait for the newest unseen frame.
    ///
    /// Returns `None` after the sender is dropped and the last frame has been
    /// taken.
    pub async fn next(&mut self) -> Option<RecognizedTextEvent> {
        loop {
            self.rx.changed().await.ok()?;
            if let Some(event) = self.rx.borrow_and_update().clone() {
                return Some(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_frames_in_order_when_consumed_promptly() {
        let (tx, mut rx) = frame_feed();

        tx.publish("1.00".into());
        assert_eq!(rx.next().await, Some("1.00".into()));

        tx.publish("2.00".into());
        assert_eq!(rx.next().await, Some("2.00".into()));
    }

    #[tokio::test]
    async fn unconsumed_frames_are_replaced() {
        let (tx, mut rx) = frame_feed();

        tx.publish("first".into());
        tx.publish("second".into());
        tx.publish("third".into());

        assert_eq!(rx.next().await, Some("third".into()));
    }

    #[tokio::test]
    async fn last_frame_survives_sender_drop() {
        let (tx, mut rx) = frame_feed();
        tx.publish("final 4.20".into());
        drop(tx);

        assert_eq!(rx.next().await, Some("final 4.20".into()));
        assert_eq!(rx.next().await, None);
    }

    #[tokio::test]
    async fn closed_feed_without_frames_ends() {
        let (tx, mut rx) = frame_feed();
        drop(tx);
        assert_eq!(rx.next().await, None);
    }

    #[test]
    fn publish_reports_dropped_receiver() {
        let (tx, rx) = frame_feed();
        assert!(tx.publish("1".into()));
        drop(rx);
        assert!(!tx.publish("2".into()));
    }
}
