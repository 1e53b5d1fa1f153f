use crate::{
    broker::LinkSender,
    message::{Link, ProbeOutcome},
    probe::Probe,
    reporters::Reporter,
};
use std::sync::Arc;

/// Performs one health check per call and reports the link back.
///
/// Cloning is cheap; every launched task gets its own `Prober` sharing the
/// same probe, reporters and completion channel.
///
/// # Fields
/// * `probe` - The HTTP collaborator doing the actual request
/// * `reporters` - Where the outcome gets printed
/// * `link_tx` - Completion channel back to the dispatcher
#[derive(Clone)]
pub struct Prober {
    probe: Arc<dyn Probe>,
    reporters: Arc<Vec<Box<dyn Reporter>>>,
    link_tx: LinkSender,
}

impl Prober {
    pub fn new(
        probe: Arc<dyn Probe>,
        reporters: Arc<Vec<Box<dyn Reporter>>>,
        link_tx: LinkSender,
    ) -> Self {
        Self {
            probe,
            reporters,
            link_tx,
        }
    }

    /// Checks `link` once, reports the outcome and sends the link back on the
    /// completion channel.
    ///
    /// Exactly one completion is sent per call, whether the check succeeded
    /// or not.
    pub async fn probe(&self, link: Link) {
        let outcome = ProbeOutcome::from(self.probe.check(link.as_str()).await);
        tracing::debug!("{} checked, up: {}", link, outcome.is_up());

        self.call_reporters(&link, &outcome).await;

        if let Err(e) = self.link_tx.send(link).await {
            tracing::warn!("Failed to send completion: {:#}", e);
        }
    }

    async fn call_reporters(&self, link: &Link, outcome: &ProbeOutcome) {
        let reporter_futures: Vec<_> = self
            .reporters
            .iter()
            .map(|reporter| async move {
                if let Err(e) = reporter.report(link, outcome).await {
                    tracing::warn!("Reporter '{}' failed: {:#}", reporter.name(), e);
                }
            })
            .collect();

        futures::future::join_all(reporter_futures).await;
    }
}
