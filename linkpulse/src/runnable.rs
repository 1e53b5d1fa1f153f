use async_trait::async_trait;

/// Trait for long-running components.
///
/// # Methods
/// * `run` - Drives the component until it is told to stop
/// * `name` - Returns the name identifier of the component
#[async_trait]
pub trait Runnable: Send + Sync {
    async fn run(&mut self);

    fn name(&self) -> &str;
}
