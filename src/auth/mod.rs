//! Authentication backend seam
//!
//! The backend itself (credential checks, session cookies) lives elsewhere;
//! the UI only talks to it through [`AuthBackend`].

pub mod forms;
pub mod memory;

pub use forms::{Field, FieldError, SignInForm, SignUpForm};
pub use memory::MemoryAuth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// E-mail/password pair used to sign in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// New account details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Signed-in session as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account already exists for {0}")]
    EmailTaken(String),
}

/// Operations the UI needs from the authentication service
pub trait AuthBackend {
    /// Create an account (and sign it in)
    fn sign_up(&mut self, request: &SignUpRequest) -> Result<(), AuthError>;
    fn sign_in(&mut self, credentials: &Credentials) -> Result<(), AuthError>;
    fn sign_out(&mut self);
    fn current_session(&self) -> Option<Session>;
}
