use crate::{
    Config,
    agent::Dispatcher,
    message::Link,
    probe::{HttpProbe, Probe},
    reporters::create_enabled_reporters,
    runnable::Runnable,
    shutdown::{Shutdown, ShutdownSignal},
};
use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};
use tokio::{
    signal::unix::{SignalKind, signal},
    task::JoinHandle,
};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Pulse {
    conf: Config,
    probe: Arc<dyn Probe>,
}

impl Pulse {
    pub fn new(conf: Config) -> Result<Self> {
        let probe = HttpProbe::new(conf.request_timeout)?;
        Ok(Self::with_probe(conf, Arc::new(probe)))
    }

    pub fn with_probe(conf: Config, probe: Arc<dyn Probe>) -> Self {
        Self { conf, probe }
    }

    /// Runs until SIGINT or SIGTERM.
    pub async fn start(&self) -> Result<()> {
        let mut sigint_stream = signal(SignalKind::interrupt()).context("watch SIGINT failed")?;
        let mut sigterm_stream =
            signal(SignalKind::terminate()).context("watch SIGTERM failed")?;

        self.run_until(async {
            tokio::select! {
                _ = sigint_stream.recv() => {
                    tracing::info!("SIGINT received, shutdown initiated...");
                }
                _ = sigterm_stream.recv() => {
                    tracing::info!("SIGTERM received, shutdown initiated...");
                }
            }
        })
        .await;
        Ok(())
    }

    /// Runs the dispatcher until `stop` resolves, then shuts it down.
    pub async fn run_until(&self, stop: impl Future<Output = ()>) {
        tracing::info!("Pulse started with {} links", self.conf.links.len());
        let shutdown = Shutdown::new();
        let handle = self.spawn_dispatcher(shutdown.subscribe());

        stop.await;
        shutdown.trigger();

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, handle).await {
            Ok(Ok(())) => tracing::info!("Shutdown complete"),
            Ok(Err(e)) => tracing::warn!("Dispatcher shutdown error: {}", e),
            Err(_) => tracing::warn!(
                "Dispatcher shutdown timed out after {} seconds",
                SHUTDOWN_TIMEOUT.as_secs()
            ),
        }
    }

    fn spawn_dispatcher(&self, shutdown: ShutdownSignal) -> JoinHandle<()> {
        let reporters = Arc::new(create_enabled_reporters(&self.conf));
        let links = self.conf.links.iter().map(Link::new).collect();
        let mut dispatcher = Dispatcher::new(
            0,
            links,
            self.probe.clone(),
            reporters,
            self.conf.channel_capacity,
            self.conf.relaunch_delay,
            shutdown,
        );

        tokio::spawn(async move {
            tracing::debug!("{} spawned", dispatcher.name());
            dispatcher.run().await;
        })
    }
}
