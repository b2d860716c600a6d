//! Sign-in collaborator
//!
//! Session handling lives behind `AuthProvider`. `LocalAuth` checks the
//! configured accounts against a shared secret taken from the environment.

use std::sync::Mutex;

use haulboard_types::{Error, Result};
use serde::Serialize;
use tracing::info;

use crate::config::Account;
use crate::notify::{Notification, Notifier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

impl User {
    /// Full name when known, otherwise the email
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<User>;

    fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    fn sign_out(&self) -> Result<()>;

    fn request_password_reset(&self, email: &str) -> Result<()>;

    /// Gate for protected views
    fn require_user(&self) -> bool {
        self.current_user().is_some()
    }
}

/// In-memory auth over the configured accounts
#[derive(Debug)]
pub struct LocalAuth {
    accounts: Vec<Account>,
    secret: Option<String>,
    session: Mutex<Option<User>>,
}

impl LocalAuth {
    /// `secret` is the shared password; sign-in is refused without one
    pub fn new(accounts: Vec<Account>, secret: Option<String>) -> Self {
        Self {
            accounts,
            secret,
            session: Mutex::new(None),
        }
    }

    fn account(&self, email: &str) -> Option<(usize, &Account)> {
        self.accounts
            .iter()
            .enumerate()
            .find(|(_, a)| a.email.eq_ignore_ascii_case(email.trim()))
    }

    fn session(&self) -> std::sync::MutexGuard<'_, Option<User>> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AuthProvider for LocalAuth {
    fn current_user(&self) -> Option<User> {
        self.session().clone()
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| Error::Auth("sign-in is disabled: no API key configured".to_string()))?;
        let (index, account) = self
            .account(email)
            .filter(|_| password == secret)
            .ok_or_else(|| Error::Auth("Invalid login credentials".to_string()))?;

        let user = User {
            id: (index + 1).to_string(),
            email: account.email.clone(),
            full_name: account.full_name.clone(),
        };
        info!(email = %user.email, "signed in");
        *self.session() = Some(user.clone());
        Ok(user)
    }

    fn sign_out(&self) -> Result<()> {
        if let Some(user) = self.session().take() {
            info!(email = %user.email, "signed out");
        }
        Ok(())
    }

    fn request_password_reset(&self, email: &str) -> Result<()> {
        // unknown addresses are not reported back
        if self.account(email).is_some() {
            info!(email = %email.trim(), "password reset requested");
        }
        Ok(())
    }
}

/// Sign in and report the outcome as a notification
pub fn sign_in_with_notice(
    auth: &dyn AuthProvider,
    notifier: &dyn Notifier,
    email: &str,
    password: &str,
) -> Result<User> {
    match auth.sign_in(email, password) {
        Ok(user) => {
            notifier.notify(&Notification::success(
                "Sign in successful",
                format!("Welcome back, {}!", user.display_name()),
            ));
            Ok(user)
        }
        Err(e) => {
            notifier.notify(&Notification::destructive("Sign in failed", e.to_string()));
            Err(e)
        }
    }
}
