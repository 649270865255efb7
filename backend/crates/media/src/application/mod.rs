//! Application Layer
//!
//! Pipeline configuration and the upload pipeline itself.

pub mod config;
pub mod pipeline;

pub use config::{MediaConfig, RemoteCredentials};
pub use pipeline::UploadPipeline;
