/// Message module for the linkpulse checker
///
/// Defines the values passed between the dispatcher, the probers and the reporters.
use std::{fmt, sync::Arc};

/// A monitored URL.
///
/// Links carry no identity beyond their text; two equal links in the
/// configured list are probed independently. Cloning is cheap, so every
/// spawned task gets its own handle to the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link(Arc<str>);

impl Link {
    pub fn new(url: impl AsRef<str>) -> Self {
        Self(Arc::from(url.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Link {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Link {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

/// Outcome of a single probe, as seen by the reporters.
///
/// The outcome never travels on the completion channel; the dispatcher only
/// learns that a link finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Any response was received. The status code is not inspected.
    Up,
    /// The request itself failed (connect, DNS, TLS, timeout, ...).
    Down { reason: String },
}

impl ProbeOutcome {
    pub fn is_up(&self) -> bool {
        matches!(self, ProbeOutcome::Up)
    }
}

impl From<anyhow::Result<()>> for ProbeOutcome {
    fn from(result: anyhow::Result<()>) -> Self {
        match result {
            Ok(()) => ProbeOutcome::Up,
            Err(e) => ProbeOutcome::Down {
                reason: format!("{:#}", e),
            },
        }
    }
}
