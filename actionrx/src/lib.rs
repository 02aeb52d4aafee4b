mod action_runner;
mod async_error;
mod async_state;
mod execution_result;
mod notifier;
mod state_store;
mod stream_ext;
pub mod mock;

pub use action_runner::*;
pub use async_error::*;
pub use async_state::*;
pub use execution_result::*;
pub use notifier::*;
pub use state_store::*;
pub use stream_ext::*;

#[cfg(test)]
mod unit_tests;

pub trait State: Clone + Send + Sync + 'static {}
