//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, gates
//!
//! ## Features
//! - One-time bootstrap of the first admin account
//! - Email + password login returning a bearer token
//! - Profile editing with avatar upload, password change
//! - Auth Gate (any valid token) and Role Gate (admin only)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never logged or returned
//! - Stateless HS256 tokens, valid for 24 hours, no revocation
//! - Unknown email and wrong password are indistinguishable to the caller
//! - Email and single-admin uniqueness enforced by the database as well

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AuthConfig, ProvisionConfig};
pub use application::{ProvisionAdminUseCase, ProvisionOutcome};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{AuthUser, GateState, require_admin, require_auth};
pub use presentation::router::auth_router;
