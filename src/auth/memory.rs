//! In-memory auth backend for tests and the native demo

use std::collections::BTreeMap;

use super::{AuthBackend, AuthError, Credentials, Session, SignUpRequest, User};

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
}

/// Accounts keyed by lower-cased e-mail, one active session at most
#[derive(Debug, Default)]
pub struct MemoryAuth {
    accounts: BTreeMap<String, Account>,
    session: Option<Session>,
    next_id: u64,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn open_session(&mut self, user: User) {
        log::info!("Signed in as {}", user.email);
        self.session = Some(Session { user });
    }
}

impl AuthBackend for MemoryAuth {
    fn sign_up(&mut self, request: &SignUpRequest) -> Result<(), AuthError> {
        let email_key = request.email.to_lowercase();
        if self.accounts.contains_key(&email_key) {
            return Err(AuthError::EmailTaken(request.email.clone()));
        }

        self.next_id += 1;
        let user = User {
            id: format!("user-{}", self.next_id),
            name: request.name.clone(),
            email: request.email.clone(),
        };
        self.accounts.insert(
            email_key,
            Account {
                user: user.clone(),
                password: request.password.clone(),
            },
        );
        self.open_session(user);
        Ok(())
    }

    fn sign_in(&mut self, credentials: &Credentials) -> Result<(), AuthError> {
        let user = self
            .accounts
            .get(&credentials.email.to_lowercase())
            .filter(|account| account.password == credentials.password)
            .map(|account| account.user.clone())
            .ok_or(AuthError::InvalidCredentials)?;
        self.open_session(user);
        Ok(())
    }

    fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("Signed out {}", session.user.email);
        }
    }

    fn current_session(&self) -> Option<Session> {
        self.session.clone()
    }
}
