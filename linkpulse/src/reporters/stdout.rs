use super::Reporter;
use crate::message::{Link, ProbeOutcome};
use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::{self, AsyncWriteExt};

/// Reporter that prints probe outcomes to stdout.
///
/// Success prints `<url> is up!`. Failure prints the error on one line and
/// `<url> might be down` on the next.
pub struct StdoutReporter;

impl StdoutReporter {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn render(link: &Link, outcome: &ProbeOutcome) -> String {
        match outcome {
            ProbeOutcome::Up => format!("{} is up!\n", link),
            ProbeOutcome::Down { reason } => {
                format!("Error: {}\n{} might be down\n", reason, link)
            }
        }
    }
}

#[async_trait]
impl Reporter for StdoutReporter {
    async fn report(&self, link: &Link, outcome: &ProbeOutcome) -> Result<()> {
        // One write per report keeps the two failure lines together.
        let message = Self::render(link, outcome);
        let mut stdout = io::stdout();
        stdout
            .write_all(message.as_bytes())
            .await
            .context("Failed to write to stdout")?;
        stdout.flush().await.context("Failed to flush stdout")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}
