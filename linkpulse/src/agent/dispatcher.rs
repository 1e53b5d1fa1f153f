use crate::{
    agent::Prober,
    broker::{self, LinkReceiver},
    message::Link,
    probe::Probe,
    reporters::Reporter,
    runnable::Runnable,
    shutdown::ShutdownSignal,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::Duration;

/// Prefix for dispatcher instance names
const DISPATCHER_NAME_PREFIX: &str = "Dispatcher";

/// Dispatcher that keeps every link under probe forever.
///
/// The Dispatcher component:
/// - Launches one probe per configured link at startup, without delay.
/// - Waits on the completion channel for links whose probe finished.
/// - For each completed link, spawns a task that sleeps `relaunch_delay` and
///   probes that link again.
///
/// The dispatcher holds its own sender through `prober`, so the completion
/// channel stays open for as long as the dispatcher runs.
///
/// # Fields
/// * `name` - Name of the dispatcher instance (e.g., "Dispatcher-0").
/// * `links` - Links probed in the first round.
/// * `prober` - Template cloned into every launched task.
/// * `link_rx` - Completion channel, single consumer.
/// * `relaunch_delay` - Wait between a completion and the next probe.
/// * `shutdown` - Cancellation signal, also handed to every launched task.
pub struct Dispatcher {
    name: String,
    links: Vec<Link>,
    prober: Prober,
    link_rx: LinkReceiver,
    relaunch_delay: Duration,
    shutdown: ShutdownSignal,
}

impl Dispatcher {
    pub fn new(
        id: usize,
        links: Vec<Link>,
        probe: Arc<dyn Probe>,
        reporters: Arc<Vec<Box<dyn Reporter>>>,
        channel_capacity: usize,
        relaunch_delay: Duration,
        shutdown: ShutdownSignal,
    ) -> Self {
        let (link_tx, link_rx) = broker::channel(channel_capacity);
        Self {
            name: format!("{}-{}", DISPATCHER_NAME_PREFIX, id),
            links,
            prober: Prober::new(probe, reporters, link_tx),
            link_rx,
            relaunch_delay,
            shutdown,
        }
    }

    /// Spawns a task that waits `delay`, then probes `link`.
    ///
    /// `link` is moved into the task, so the task keeps probing the value it
    /// was launched with no matter what the dispatcher receives next.
    fn launch(&self, link: Link, delay: Duration) {
        let prober = self.prober.clone();
        let mut shutdown = self.shutdown.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = async {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    prober.probe(link).await;
                } => {}
                _ = shutdown.wait() => {}
            }
        });
    }

    fn launch_initial(&self) {
        for link in &self.links {
            tracing::debug!("{} launching {}", self.name, link);
            self.launch(link.clone(), Duration::ZERO);
        }
    }
}

#[async_trait]
impl Runnable for Dispatcher {
    async fn run(&mut self) {
        tracing::info!(
            "Starting {} with {} links, relaunch delay {:?}",
            self.name,
            self.links.len(),
            self.relaunch_delay
        );
        if self.shutdown.is_triggered() {
            tracing::info!("{} stopped before start", self.name);
            return;
        }

        self.launch_initial();

        loop {
            tokio::select! {
                received = self.link_rx.receive() => match received {
                    Some(link) => {
                        tracing::debug!("{} relaunching {}", self.name, link);
                        self.launch(link, self.relaunch_delay);
                    }
                    None => {
                        // Unreachable while `self.prober` holds a sender.
                        tracing::warn!("{} completion channel closed", self.name);
                        break;
                    }
                },
                _ = self.shutdown.wait() => {
                    tracing::info!("{} received shutdown signal", self.name);
                    break;
                }
            }
        }
        tracing::info!("{} stopped.", self.name);
    }

    fn name(&self) -> &str {
        &self.name
    }
}
