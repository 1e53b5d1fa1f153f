//! Concurrent URL health checker.
//!
//! Every configured link is probed on its own task. A finished probe sends its
//! link back on a shared channel, and the dispatcher relaunches a probe for it
//! after a fixed delay, forever or until shutdown.
pub mod agent;
pub mod broker;
pub mod config;
pub mod logger;
pub mod message;
pub mod probe;
pub mod pulse;
pub mod reporters;
pub mod runnable;
pub mod shutdown;

pub use config::Config;
pub use pulse::Pulse;
