//! Mock login gate in front of the home view.
//!
//! One hard-coded account; state lives only as long as the gate does.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::AuthError;

/// A row in the mock account's recent activity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// ISO date
    pub date: &'static str,
    /// Merchant or memo
    pub description: &'static str,
    /// Formatted amount
    pub amount: &'static str,
}

/// The demo account shown on the home view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MockUser {
    /// Login name
    pub username: &'static str,
    /// Plain-text password; never serialized
    #[serde(skip)]
    pub password: &'static str,
    /// Display name
    pub name: &'static str,
    /// Account number
    pub account: &'static str,
    /// Formatted balance
    pub balance: &'static str,
    /// Recent activity, newest first
    pub transactions: &'static [Transaction],
}

/// The only credentials the gate accepts.
pub static MOCK_USER: MockUser = MockUser {
    username: "johndoe",
    password: "test123",
    name: "John Doe",
    account: "1234567890",
    balance: "8,215.67",
    transactions: &[
        Transaction {
            date: "2025-04-08",
            description: "Grocery Store",
            amount: "85.23",
        },
        Transaction {
            date: "2025-04-06",
            description: "Online Subscription",
            amount: "15.99",
        },
        Transaction {
            date: "2025-04-04",
            description: "Coffee Shop",
            amount: "4.75",
        },
    ],
};

/// Logged in / logged out.
#[derive(Debug, Default)]
pub struct AuthGate {
    logged_in: bool,
}

impl AuthGate {
    /// Start logged out
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a login has succeeded since the last logout
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Log in if the credentials match the mock account
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if username == MOCK_USER.username && password == MOCK_USER.password {
            self.logged_in = true;
            info!(username, "Login succeeded");
            Ok(())
        } else {
            warn!(username, "Login rejected");
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Drop back to logged out
    pub fn logout(&mut self) {
        if self.logged_in {
            info!("Logged out");
        }
        self.logged_in = false;
    }

    /// The account behind the session, if logged in
    pub fn user(&self) -> Result<&'static MockUser, AuthError> {
        if self.logged_in {
            Ok(&MOCK_USER)
        } else {
            Err(AuthError::NotLoggedIn)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_logged_out() {
        let gate = AuthGate::new();
        assert!(!gate.is_logged_in());
        assert!(matches!(gate.user(), Err(AuthError::NotLoggedIn)));
    }

    #[test]
    fn test_login_with_mock_credentials() {
        let mut gate = AuthGate::new();
        assert!(gate.login("johndoe", "test123").is_ok());
        assert!(gate.is_logged_in());
        assert_eq!(gate.user().unwrap().name, "John Doe");
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        let mut gate = AuthGate::new();
        let result = gate.login("johndoe", "wrong");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(!gate.is_logged_in());
    }

    #[test]
    fn test_login_is_case_sensitive() {
        let mut gate = AuthGate::new();
        assert!(gate.login("JohnDoe", "test123").is_err());
    }

    #[test]
    fn test_logout() {
        let mut gate = AuthGate::new();
        gate.login("johndoe", "test123").unwrap();
        gate.logout();
        assert!(!gate.is_logged_in());
    }

    #[test]
    fn test_user_serialization_omits_password() {
        let value = serde_json::to_value(&MOCK_USER).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["transactions"].as_array().unwrap().len(), 3);
    }
}
