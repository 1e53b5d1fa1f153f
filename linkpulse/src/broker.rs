use crate::message::Link;
use anyhow::{Context, Result};
use std::fmt;
use tokio::sync::{Semaphore, mpsc};

/// Largest capacity `tokio::sync::mpsc` accepts without panicking.
pub const MAX_CHANNEL_CAPACITY: usize = Semaphore::MAX_PERMITS;

/// Creates the completion channel shared by every prober and the dispatcher.
///
/// The channel is bounded; when it is full, probers wait on `send` until the
/// dispatcher catches up. Capacity must be between one and
/// [`MAX_CHANNEL_CAPACITY`].
pub fn channel(capacity: usize) -> (LinkSender, LinkReceiver) {
    let (tx, rx) = mpsc::channel(capacity);
    (MpscSender::new(tx), MpscReceiver::new(rx))
}

#[derive(Clone)]
pub struct MpscSender<T> {
    tx: mpsc::Sender<T>,
}

impl<T> MpscSender<T>
where
    T: Send + Sync + fmt::Debug + 'static,
{
    fn new(tx: mpsc::Sender<T>) -> Self {
        Self { tx }
    }

    pub async fn send(&self, value: T) -> Result<()> {
        let value_desc = format!("{:?}", value);
        self.tx
            .send(value)
            .await
            .with_context(|| format!("failed to send value: {}", value_desc))
    }
}

// Single consumer; owned by the dispatcher, no lock needed.
pub struct MpscReceiver<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> MpscReceiver<T>
where
    T: Send + 'static,
{
    fn new(rx: mpsc::Receiver<T>) -> Self {
        Self { rx }
    }

    pub async fn receive(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

pub type LinkSender = MpscSender<Link>;
pub type LinkReceiver = MpscReceiver<Link>;
