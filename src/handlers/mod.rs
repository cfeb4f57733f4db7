//! HTTP handlers for catalog reads and signup.

pub mod catalog;
pub mod signup;
pub use catalog::*;
pub use signup::*;
