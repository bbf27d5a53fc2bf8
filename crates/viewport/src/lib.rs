//! Map viewport state carried across renders of one session.

pub mod controller;
pub mod protocol;

pub use controller::*;
pub use protocol::*;
