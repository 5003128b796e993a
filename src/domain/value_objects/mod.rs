//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod account_id;
mod config_warning;
mod package_path;
mod plan_digest;

pub use account_id::AccountId;
pub use config_warning::ConfigWarning;
pub use package_path::{PackagePathMode, Packaging};
pub use plan_digest::PlanDigest;
