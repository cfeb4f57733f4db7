//! Create users from the signup form.

use crate::error::AppError;
use crate::seed::random_profile;
use crate::service::SignupValidator;
use crate::store::{insert_user, User};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use sqlx::PgPool;

/// Fields posted by the signup form.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    #[serde(rename = "signupFormEmail")]
    pub email: String,
    #[serde(rename = "signupFormEmailAgain")]
    pub email_again: String,
    #[serde(rename = "signupFormPassword")]
    pub password: String,
    #[serde(rename = "signupFormPasswordAgain")]
    pub password_again: String,
}

// Passwords stay out of logs.
impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("email_again", &self.email_again)
            .finish_non_exhaustive()
    }
}

pub struct SignupService;

impl SignupService {
    /// Validate `form`, then store a user with random default attributes and the submitted email.
    pub async fn register(pool: Option<&PgPool>, form: &SignupForm) -> Result<User, AppError> {
        SignupValidator::validate(form)?;
        let pool = pool.ok_or_else(|| AppError::Unavailable("signup requires a database".into()))?;

        let mut profile = random_profile(&mut StdRng::from_entropy(), "0");
        profile.email = form.email.trim().to_string();
        let user = insert_user(pool, &profile).await?;
        tracing::info!(user_id = %user.profile.id, "user signed up");
        Ok(user)
    }
}
