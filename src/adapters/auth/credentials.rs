//! Implements Authenticator against the accounts listed in configuration.
//! Passwords are compared as SHA-256 hex digests; plaintext is never stored.
//! Usernames match case-insensitively: the config loader lowercases map keys.

use crate::domain::User;
use crate::ports::Authenticator;
use crate::shared::config::CredentialEntry;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Lowercase hex SHA-256 of `password`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

pub struct ConfigAuthenticator {
    accounts: HashMap<String, CredentialEntry>,
}

impl ConfigAuthenticator {
    pub fn new(accounts: HashMap<String, CredentialEntry>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|(username, entry)| (username.to_lowercase(), entry))
            .collect();
        Self { accounts }
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Authenticator for ConfigAuthenticator {
    fn verify(&self, username: &str, password: &str) -> Option<User> {
        let username = username.to_lowercase();
        let entry = self.accounts.get(&username)?;
        if entry.password_sha256.eq_ignore_ascii_case(&hash_password(password)) {
            Some(User {
                username,
                name: entry.name.clone(),
            })
        } else {
            None
        }
    }
}
