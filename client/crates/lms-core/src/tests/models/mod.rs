mod identity;
mod portal;
mod role;
mod session_state;
