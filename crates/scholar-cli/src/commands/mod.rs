//! Command implementations.

pub mod profile;
pub mod reputation;

pub use self::profile::execute_profile;
pub use self::reputation::{execute_institution, execute_me, execute_user};
