use chrono::{DateTime, FixedOffset, Local, Utc};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use stock_buddy::{
    config::{database, seed},
    core::{aggregation::Period, product::ProductForm, seed::seed_store},
    errors::{Error, Result},
    views::{App, Navigation},
};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Inventory and sales dashboard backed by in-memory seed data.
#[derive(Parser, Debug)]
#[command(name = "stock-buddy")]
#[command(about = "Inventory and sales management dashboard")]
#[command(version)]
struct Cli {
    /// Seed file (defaults to $STOCK_BUDDY_CONFIG or ./config.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Sign in as the user with this email
    #[arg(long = "as", value_name = "EMAIL")]
    user: Option<String>,

    /// Chart period on the sales view
    #[arg(short, long, value_name = "day|week|month")]
    period: Option<Period>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the view at a path (default: /sales)
    View {
        #[arg(default_value = "/sales")]
        path: String,
    },
    /// Record a sale, then show the sales view
    Sell {
        #[arg(long)]
        product: Option<i64>,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
    },
    /// Add a product, then show the inventory
    AddProduct {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        stock: Option<i64>,
        #[arg(long)]
        threshold: Option<i64>,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Change fields of a product, then show the inventory
    EditProduct {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        stock: Option<i64>,
        #[arg(long)]
        threshold: Option<i64>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product; without --yes only the confirmation is shown
    DeleteProduct {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let cli = Cli::parse();

    // 3. Load seed data
    let config = match &cli.config {
        Some(path) => seed::load_config(path),
        None => seed::load_default_config(),
    }
    .inspect_err(|e| error!("Failed to load seed configuration: {}", e))?;

    // 4. Build the in-memory store and seed it
    let started = Utc::now();
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to open store: {}", e))?;
    seed_store(&db, &config, started)
        .await
        .inspect_err(|e| error!("Failed to seed store: {}", e))?;

    let offset = config.settings.utc_offset_minutes;
    let mut app = App::new(db, config);
    if let Some(email) = &cli.user {
        if !app.sign_in(email) {
            warn!(email = %email, "No such user; staying signed out");
        }
    }
    if let Some(period) = cli.period {
        app.sales.select_period(period);
    }

    // 5. Apply the requested action and pick the view to show
    let path = run_command(&mut app, cli.command).await?;

    let now = local_now(offset)?;
    let (navigation, body) = app.render(&path, &now).await?;
    if let Navigation::Redirect { to, .. } = navigation {
        println!("(redirected to {to})\n");
    }
    print!("{body}");

    info!("Done");
    Ok(())
}

async fn run_command(app: &mut App, command: Option<Command>) -> Result<String> {
    let path = match command.unwrap_or(Command::View {
        path: "/sales".to_string(),
    }) {
        Command::View { path } => path,
        Command::Sell { product, quantity } => {
            app.sales.select_product(product);
            app.sales.set_quantity(quantity);
            app.sales.submit(&app.database, Utc::now()).await?;
            "/sales".to_string()
        }
        Command::AddProduct {
            name,
            price,
            stock,
            threshold,
            image,
        } => {
            app.inventory.open_add();
            app.inventory.form = ProductForm {
                name,
                price,
                stock,
                threshold,
                image,
            };
            app.inventory.submit(&app.database).await?;
            "/inventory".to_string()
        }
        Command::EditProduct {
            id,
            name,
            price,
            stock,
            threshold,
            image,
        } => {
            match stock_buddy::core::product::get_product_by_id(&app.database, id).await? {
                Some(existing) => {
                    app.inventory.open_edit(&existing);
                    let form = &mut app.inventory.form;
                    if let Some(name) = name {
                        form.name = name;
                    }
                    form.price = price.or(form.price);
                    form.stock = stock.or(form.stock);
                    form.threshold = threshold.or(form.threshold);
                    if let Some(image) = image {
                        form.image = image;
                    }
                    app.inventory.submit(&app.database).await?;
                }
                None => app.inventory.error = Some(format!("Product #{id} not found")),
            }
            "/inventory".to_string()
        }
        Command::DeleteProduct { id, yes } => {
            app.inventory.open_delete(id);
            if yes {
                app.inventory.confirm_delete(&app.database).await?;
            }
            "/inventory".to_string()
        }
    };
    Ok(path)
}

/// Current time in the configured offset, or the system's local offset.
fn local_now(offset_minutes: Option<i32>) -> Result<DateTime<FixedOffset>> {
    match offset_minutes {
        Some(minutes) => {
            let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| Error::Config {
                message: format!("utc_offset_minutes out of range: {minutes}"),
            })?;
            Ok(Utc::now().with_timezone(&offset))
        }
        None => Ok(Local::now().fixed_offset()),
    }
}
