//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Bearer token issuing and verification (JWT, HS256)
//! - `Authorization` header parsing
//! - Random helpers

pub mod bearer;
pub mod crypto;
pub mod password;
pub mod token;
