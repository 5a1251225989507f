//! User statistics for the user dashboard.

use crate::config::users::{Role, UserConfig};

/// Users holding one role and their share of the directory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleShare {
    pub role: Role,
    pub count: usize,
    /// Share of all users in percent, 0 when there are no users
    pub percent: f64,
}

/// Breakdown of the user directory by role.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleDistribution {
    pub total: usize,
    /// One entry per role, in [`Role::ALL`] order
    pub shares: Vec<RoleShare>,
}

impl RoleDistribution {
    #[must_use]
    pub fn from_users(users: &[UserConfig]) -> Self {
        let total = users.len();
        let shares = Role::ALL
            .iter()
            .map(|&role| {
                let count = users.iter().filter(|u| u.role == role).count();
                RoleShare {
                    role,
                    count,
                    percent: share_percent(count, total),
                }
            })
            .collect();

        Self { total, shares }
    }

    /// Number of users with `role`.
    #[must_use]
    pub fn count(&self, role: Role) -> usize {
        self.shares
            .iter()
            .find(|s| s.role == role)
            .map_or(0, |s| s.count)
    }
}

#[allow(clippy::cast_precision_loss)]
fn share_percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}
