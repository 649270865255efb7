//! Infrastructure Layer
//!
//! Local disk storage and the remote media host client.

pub mod cloudinary;
pub mod local;

pub use cloudinary::CloudinaryClient;
pub use local::LocalDisk;
