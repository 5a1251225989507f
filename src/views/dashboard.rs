//! User dashboard: directory size and role distribution.

use crate::{
    config::users::{Role, UserConfig},
    core::users::RoleDistribution,
    errors::Result,
    views::format::format_bar,
};
use std::fmt::Write;

const SHARE_BAR_WIDTH: usize = 20;

pub fn render_user_dashboard(
    users: &[UserConfig],
    current: Option<&UserConfig>,
) -> Result<String> {
    let dist = RoleDistribution::from_users(users);
    let mut out = String::new();

    writeln!(out, "User Dashboard")?;
    writeln!(out, "Overview of system users and roles")?;
    if let Some(user) = current {
        writeln!(out, "Signed in as {} ({})", user.name, user.role)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Total Users: {} | Sales Staff: {} | Inventory Staff: {}",
        dist.total,
        dist.count(Role::Sales),
        dist.count(Role::Inventory)
    )?;
    writeln!(out)?;
    writeln!(out, "Role Distribution")?;
    for share in &dist.shares {
        writeln!(
            out,
            "{:<16} {:>3} {} {:.0}% of total users",
            format!("{} Users", share.role),
            share.count,
            format_bar(share.percent, 100.0, SHARE_BAR_WIDTH),
            share.percent
        )?;
    }

    Ok(out)
}
