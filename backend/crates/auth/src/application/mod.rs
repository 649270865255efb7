//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
pub mod current_user;
pub mod init_admin;
pub mod provision_admin;
pub mod sign_in;
pub mod token;
pub mod update_profile;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::{AuthConfig, ProvisionConfig};
pub use current_user::CurrentUserUseCase;
pub use init_admin::{InitAdminInput, InitAdminOutput, InitAdminUseCase};
pub use provision_admin::{ProvisionAdminUseCase, ProvisionOutcome};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use update_profile::{UpdateProfileInput, UpdateProfileUseCase};
