//! Login table.
//!
//! Plain user → password pairs. This gates the screens and stamps records
//! with a user name; it is not a security boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    /// user → password. Default: the three built-in accounts.
    pub users: Option<BTreeMap<String, String>>,
}

impl AuthConfig {
    pub fn effective_users(&self) -> BTreeMap<String, String> {
        self.users.clone().unwrap_or_else(default_users)
    }

    pub fn verify(&self, user: &str, password: &str) -> bool {
        if user.is_empty() {
            return false;
        }
        match &self.users {
            Some(users) => users.get(user).is_some_and(|p| p == password),
            None => default_users().get(user).is_some_and(|p| p == password),
        }
    }
}

fn default_users() -> BTreeMap<String, String> {
    [
        ("admin", "admin123"),
        ("rh.agricola", "cana2026"),
        ("analista", "senha123"),
    ]
    .into_iter()
    .map(|(u, p)| (u.to_string(), p.to_string()))
    .collect()
}
