//! Channel-backed progress sink.

use bsheet_core::ProgressSink;
use tokio::sync::mpsc;

/// One progress notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Completed fraction, 0.0 to 1.0.
    pub fraction: f32,
    /// Phase label.
    pub label: String,
}

/// Forwards progress to an unbounded tokio channel.
///
/// Reporting never blocks; events are dropped once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgress {
    /// Creates a sink and the receiver for its events.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&self, fraction: f32, label: &str) {
        let _ = self.tx.send(ProgressEvent {
            fraction,
            label: label.to_string(),
        });
    }
}

/// Maps a sink's `[0, 1]` range onto a sub-range of another sink.
pub(crate) struct ScaledProgress<'a> {
    pub(crate) inner: &'a dyn ProgressSink,
    pub(crate) offset: f32,
    pub(crate) scale: f32,
}

impl ProgressSink for ScaledProgress<'_> {
    fn report(&self, fraction: f32, label: &str) {
        self.inner
            .report(self.offset + fraction * self.scale, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsheet_core::Phase;

    #[tokio::test]
    async fn test_channel_progress() {
        let (sink, mut rx) = ChannelProgress::new();
        Phase::FilerResolved.notify(&sink);
        Phase::Complete.notify(&sink);
        drop(sink);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.label, "Resolved filer identity");
        assert_eq!(rx.recv().await.unwrap().fraction, 1.0);
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_report_after_receiver_dropped() {
        let (sink, rx) = ChannelProgress::new();
        drop(rx);
        sink.report(0.5, "ignored");
    }

    #[tokio::test]
    async fn test_scaled_progress() {
        let (sink, mut rx) = ChannelProgress::new();
        let scaled = ScaledProgress {
            inner: &sink,
            offset: 0.5,
            scale: 0.5,
        };
        Phase::Complete.notify(&scaled);
        Phase::FilerResolved.notify(&scaled);
        assert_eq!(rx.recv().await.unwrap().fraction, 1.0);
        assert!((rx.recv().await.unwrap().fraction - 0.55).abs() < 1e-6);
    }
}
