//! Domain Layer
//!
//! Assets, upload policies and file naming.

pub mod asset;
pub mod file_name;
pub mod policy;

pub use asset::{IncomingFile, StorageProvider, StoredAsset};
pub use policy::{ImageRule, UploadPolicy};
