//! Login flow. Delegates the credential check to the Authenticator port.

use crate::domain::{DomainError, User};
use crate::ports::Authenticator;
use std::sync::Arc;
use tracing::{info, warn};

pub const INCORRECT_CREDENTIALS: &str = "Username/password is incorrect";

pub struct AuthService {
    authenticator: Arc<dyn Authenticator>,
}

impl AuthService {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Check credentials. Empty username or password is rejected without a lookup.
    pub fn login(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::Auth(
                "Please enter your username and password".into(),
            ));
        }
        match self.authenticator.verify(username, password) {
            Some(user) => {
                info!(user = %user.username, "login succeeded");
                Ok(user)
            }
            None => {
                warn!(user = %username, "login rejected");
                Err(DomainError::Auth(INCORRECT_CREDENTIALS.into()))
            }
        }
    }
}
