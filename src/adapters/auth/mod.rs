pub mod credentials;

pub use credentials::{ConfigAuthenticator, hash_password};
