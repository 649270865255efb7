//! Presentation Layer
//!
//! Multipart reading, DTOs, handlers and the admin media router.

pub mod dto;
pub mod handlers;
pub mod multipart;
pub mod router;

pub use handlers::MediaAppState;
pub use multipart::{MultipartForm, read_form};
pub use router::{MAX_MULTIPART_BODY, media_router};
