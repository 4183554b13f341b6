pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use models::identity::{Identity, normalize_role};
pub use models::portal::Portal;
pub use models::role::Role;
pub use models::session_state::SessionState;
