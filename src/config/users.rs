//! Mock user directory and the signed-in session.
//!
//! Users come from the `[[users]]` tables in `config.toml`. The session user
//! is picked by email, either from `[session]` or from the
//! `STOCK_BUDDY_USER` environment variable, which takes precedence. There is
//! no password check; this is a demo login.

use serde::Deserialize;
use std::fmt;

/// Environment variable naming the signed-in user's email.
pub const SESSION_USER_ENV: &str = "STOCK_BUDDY_USER";

/// Role of a mock user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Sales,
    Inventory,
}

impl Role {
    /// All roles in display order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Sales, Self::Inventory];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Sales => "Sales",
            Self::Inventory => "Inventory",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A mock user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserConfig {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserConfig {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// `[session]` table: who is signed in when the process starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Email of the signed-in user; absent means signed out
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolves the signed-in user.
///
/// The environment variable wins over the config file. An email that matches
/// no configured user leaves the session signed out.
#[must_use]
pub fn resolve_session_user(
    users: &[UserConfig],
    session: &SessionConfig,
) -> Option<UserConfig> {
    let email = std::env::var(SESSION_USER_ENV)
        .ok()
        .or_else(|| session.email.clone())?;
    find_user_by_email(users, &email)
}

/// Case-insensitive lookup by email.
#[must_use]
pub fn find_user_by_email(users: &[UserConfig], email: &str) -> Option<UserConfig> {
    let email = email.trim();
    users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(email))
        .cloned()
}
