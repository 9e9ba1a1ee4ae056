//! Core value types.

mod email;
mod gid;

pub use email::{Email, EmailError};
pub use gid::{ResourceKind, extract_token, qualify};
