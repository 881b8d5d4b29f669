//! Beamlit SDK
//!
//! Typed client for the Beamlit control plane: workspaces, agents,
//! functions, models and their deployment, metrics and history
//! sub-resources, plus tool adapters for remote functions.

pub mod api;
pub mod client;
pub mod codec;
pub mod error;
pub mod models;
pub mod settings;
pub mod toolkit;

// Re-exports for convenience
pub use client::{Client, Credentials, Response};
pub use codec::{Field, Record};
pub use error::{Error, Result};
pub use settings::Settings;
