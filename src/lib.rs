pub mod chain_client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod panel;
pub mod render;
pub mod workflow;

pub use chain_client::*;
pub use config::*;
pub use contracts::*;
pub use error::WorkflowError;
pub use panel::*;
pub use render::ReadOutcome;
pub use workflow::*;
