pub mod identity;
pub mod portal;
pub mod role;
pub mod session_state;
