pub mod dispatcher;
pub mod prober;

pub use dispatcher::Dispatcher;
pub use prober::Prober;
