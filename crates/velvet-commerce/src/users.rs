//! User types.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// A registered shopper.
///
/// Credentials and session handling live in the authentication layer; carts
/// and orders only need the identity and display fields carried here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Unix timestamp of registration.
    pub created_at: i64,
}

impl User {
    /// Create a new user.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            created_at: current_timestamp(),
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("Ana Souza", "ana@example.com");
        assert_eq!(user.name, "Ana Souza");
        assert_eq!(user.email, "ana@example.com");
        assert!(!user.id.as_str().is_empty());
    }
}
