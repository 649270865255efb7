//! Media Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Assets, upload policies, generated file names
//! - `application/` - Pipeline configuration and the upload pipeline
//! - `infra/` - Local disk storage and the Cloudinary client
//! - `presentation/` - Multipart reading, HTTP handlers, router
//!
//! ## Storage Model
//! - Remote host when credentials are configured, local directory otherwise
//! - Type and size are checked before any byte is written
//! - Staged files are always removed, whatever the outcome
//! - Deletion is best-effort and reports a boolean

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{MediaConfig, RemoteCredentials, UploadPipeline};
pub use domain::{ImageRule, IncomingFile, StorageProvider, StoredAsset, UploadPolicy};
pub use error::{MediaError, MediaResult};
pub use presentation::{MAX_MULTIPART_BODY, MultipartForm, media_router, read_form};

#[cfg(test)]
mod tests;
