//! Signup: form validation and user creation.

mod signup;
mod validation;
pub use signup::{SignupForm, SignupService};
pub use validation::SignupValidator;
