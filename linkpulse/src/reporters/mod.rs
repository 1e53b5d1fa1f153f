mod stdout;

use crate::{
    Config,
    message::{Link, ProbeOutcome},
};
use anyhow::Result;
use async_trait::async_trait;

pub use stdout::StdoutReporter;

/// Trait for the ways a probe outcome is surfaced.
///
/// Reporters handle their own failures; an error from one reporter must not
/// affect the others or the completion of the probe.
#[async_trait]
pub trait Reporter: Send + Sync {
    async fn report(&self, link: &Link, outcome: &ProbeOutcome) -> Result<()>;

    /// Returns the name of this reporter for logging purposes.
    fn name(&self) -> &'static str;
}

pub fn create_enabled_reporters(conf: &Config) -> Vec<Box<dyn Reporter>> {
    let mut reporters: Vec<Box<dyn Reporter>> = Vec::new();

    if conf.reporter.enable_stdout {
        reporters.push(Box::new(StdoutReporter::new()));
    }

    reporters
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stdout_enabled_by_default() {
        let reporters = create_enabled_reporters(&Config::default());
        let names: Vec<_> = reporters.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["stdout"]);
    }

    #[test]
    fn test_stdout_can_be_disabled() {
        let mut conf = Config::default();
        conf.reporter.enable_stdout = false;
        assert!(create_enabled_reporters(&conf).is_empty());
    }
}
