//! Routing shell - maps paths to views and gates them by session.
//!
//! | Path         | View           | Access    |
//! |--------------|----------------|-----------|
//! | `/`          | Landing        | public    |
//! | `/login`     | Login          | public    |
//! | `/register`  | Register       | public    |
//! | `/dashboard` | User dashboard | signed in |
//! | `/sales`     | Sales          | signed in |
//! | `/inventory` | Inventory      | admin     |
//!
//! Signed-out visitors to a gated view go to `/login`; signed-in users
//! without the admin role go to `/dashboard`. Unknown paths land on `/`.

use crate::config::users::UserConfig;
use std::fmt;

/// A named view reachable by path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Sales,
    Inventory,
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    SignedIn,
    Admin,
}

impl Route {
    pub const ALL: [Self; 6] = [
        Self::Landing,
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Sales,
        Self::Inventory,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
            Self::Sales => "/sales",
            Self::Inventory => "/inventory",
        }
    }

    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Landing | Self::Login | Self::Register => Access::Public,
            Self::Dashboard | Self::Sales => Access::SignedIn,
            Self::Inventory => Access::Admin,
        }
    }

    /// Matches a path, ignoring a trailing slash and any query string.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|r| r.path() == normalized)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of navigating to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The requested view may be shown
    Render(Route),
    /// Access was refused or the path was unknown; show this view instead
    Redirect { from: Option<Route>, to: Route },
}

impl Navigation {
    /// The view that ends up on screen.
    #[must_use]
    pub const fn target(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect { to: route, .. } => route,
        }
    }
}

/// Resolves a path against the current session.
///
/// Redirects are followed until a view may be rendered; the chain is at most
/// two steps because `/dashboard` only needs a signed-in user and `/login`
/// is public.
#[must_use]
pub fn navigate(path: &str, user: Option<&UserConfig>) -> Navigation {
    let Some(requested) = Route::from_path(path) else {
        return Navigation::Redirect {
            from: None,
            to: Route::Landing,
        };
    };

    let target = guard(requested, user);
    if target == requested {
        Navigation::Render(requested)
    } else {
        Navigation::Redirect {
            from: Some(requested),
            to: guard(target, user),
        }
    }
}

fn guard(route: Route, user: Option<&UserConfig>) -> Route {
    match (route.access(), user) {
        (Access::Public, _) => route,
        (Access::SignedIn | Access::Admin, None) => Route::Login,
        (Access::SignedIn, Some(_)) => route,
        (Access::Admin, Some(u)) if u.is_admin() => route,
        (Access::Admin, Some(_)) => Route::Dashboard,
    }
}
