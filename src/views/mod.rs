//! View layer - text rendering of the dashboard's pages and their local state.
//!
//! Each page owns its UI state as plain values (selected tab, form fields,
//! open modal). [`App`] ties them to the store and the routing shell.

/// User dashboard
pub mod dashboard;
/// Currency, date and bar formatting
pub mod format;
/// Inventory table, product modals and delete confirmation
pub mod inventory;
/// Routing shell and access gates
pub mod routes;
/// Sales dashboard and sale form
pub mod sales;

use crate::{
    config::{
        seed::{Config, Settings},
        users::{UserConfig, find_user_by_email, resolve_session_user},
    },
    errors::Result,
};
use chrono::{DateTime, FixedOffset};
use sea_orm::DatabaseConnection;
use tracing::info;

pub use inventory::InventoryView;
pub use routes::{Navigation, Route, navigate};
pub use sales::SalesView;

/// Everything a session needs: the store, the user directory, who is signed
/// in, and the state of each page.
pub struct App {
    /// Connection to the in-memory store
    pub database: DatabaseConnection,
    /// Display settings from `config.toml`
    pub settings: Settings,
    users: Vec<UserConfig>,
    session: Option<UserConfig>,
    /// Sales dashboard state
    pub sales: SalesView,
    /// Inventory page state
    pub inventory: InventoryView,
}

impl App {
    /// Creates the session state for an already seeded store.
    #[must_use]
    pub fn new(database: DatabaseConnection, config: Config) -> Self {
        let session = resolve_session_user(&config.users, &config.session);
        if let Some(user) = &session {
            info!(user = %user.email, role = %user.role, "Signed in");
        }

        Self {
            database,
            sales: SalesView::new(
                config.settings.default_period,
                config.settings.recent_sales_limit,
            ),
            inventory: InventoryView::new(),
            settings: config.settings,
            users: config.users,
            session,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserConfig> {
        self.session.as_ref()
    }

    /// Signs in the user with this email. Returns false, leaving the session
    /// unchanged, when no such user exists.
    pub fn sign_in(&mut self, email: &str) -> bool {
        match find_user_by_email(&self.users, email) {
            Some(user) => {
                info!(user = %user.email, "Signed in");
                self.session = Some(user);
                true
            }
            None => false,
        }
    }

    pub fn sign_out(&mut self) {
        self.session = None;
    }

    /// Navigates to `path` and renders whichever view the shell allows.
    pub async fn render(
        &self,
        path: &str,
        now: &DateTime<FixedOffset>,
    ) -> Result<(Navigation, String)> {
        let navigation = navigate(path, self.current_user());
        if let Navigation::Redirect { from, to } = navigation {
            info!(requested = path, ?from, %to, "Redirected");
        }

        let body = match navigation.target() {
            Route::Landing => render_landing(),
            Route::Login => render_login(),
            Route::Register => render_register(),
            Route::Dashboard => {
                dashboard::render_user_dashboard(&self.users, self.current_user())?
            }
            Route::Sales => self.sales.render(&self.database, now).await?,
            Route::Inventory => self.inventory.render(&self.database).await?,
        };

        Ok((navigation, body))
    }
}

fn render_landing() -> String {
    "StockBuddy\nInventory and sales management for small shops.\nSign in at /login to get started.\n"
        .to_string()
}

fn render_login() -> String {
    "Sign In\nSet STOCK_BUDDY_USER (or [session] email in config.toml) to the email of a configured user.\n"
        .to_string()
}

fn render_register() -> String {
    "Create Account\nAccounts are mock data: add a [[users]] entry to config.toml.\n".to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        config::{seed::parse_config, users::Role},
        core::seed::seed_store,
        test_utils::setup_test_db,
    };
    use chrono::Utc;

    const CONFIG: &str = r#"
        [[products]]
        id = 1
        name = "Wireless Mouse"
        price = 25.0
        stock = 40
        threshold = 10

        [[sales]]
        product_id = 1
        quantity = 2
        hours_ago = 2

        [[users]]
        name = "Ada"
        email = "ada@example.com"
        role = "admin"

        [[users]]
        name = "Sam"
        email = "sam@example.com"
        role = "sales"
    "#;

    async fn app() -> Result<App> {
        let db = setup_test_db().await?;
        let config = parse_config(CONFIG)?;
        seed_store(&db, &config, Utc::now()).await?;
        Ok(App::new(db, config))
    }

    #[tokio::test]
    async fn test_gated_views_follow_session() -> Result<()> {
        let mut app = app().await?;
        let now = Utc::now().fixed_offset();

        // The environment may name a session user; start from a known state
        app.sign_out();
        let (nav, body) = app.render("/sales", &now).await?;
        assert_eq!(nav.target(), Route::Login);
        assert!(body.starts_with("Sign In"));

        assert!(app.sign_in("sam@example.com"));
        assert_eq!(app.current_user().unwrap().role, Role::Sales);
        let (nav, body) = app.render("/sales", &now).await?;
        assert_eq!(nav, Navigation::Render(Route::Sales));
        assert!(body.contains("Total Sales: $50.00"));

        let (nav, body) = app.render("/inventory", &now).await?;
        assert_eq!(nav.target(), Route::Dashboard);
        assert!(body.contains("Total Users: 2"));

        assert!(app.sign_in("ada@example.com"));
        let (nav, body) = app.render("/inventory", &now).await?;
        assert_eq!(nav, Navigation::Render(Route::Inventory));
        assert!(body.contains("Wireless Mouse"));

        assert!(!app.sign_in("mallory@example.com"));
        assert_eq!(app.current_user().unwrap().name, "Ada");
        Ok(())
    }
}
