//! Host process for the shop store.
//!
//! Loads settings, prepares the store and optionally runs a bulk transfer:
//!
//! ```text
//! pushkind-shop                 # ensure schema and print a summary
//! pushkind-shop export BASE     # write BASE_{table}.csv files
//! pushkind-shop import BASE     # load BASE_{table}.csv files
//! ```

use std::env;
use std::path::Path;
use std::process::ExitCode;

use config::Config;
use dotenvy::dotenv;

use pushkind_shop::db::establish_connection_pool_with;
use pushkind_shop::models::config::AppConfig;
use pushkind_shop::repository::DieselRepository;
use pushkind_shop::services::{ServiceResult, analytics, client, order, product, transfer};

const TOP_CUSTOMERS: usize = 5;

fn load_config() -> Result<AppConfig, config::ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<AppConfig>()
}

fn summarize(repo: &DieselRepository) -> ServiceResult<()> {
    let clients = client::list_clients(repo)?;
    let products = product::list_products(repo)?;
    let orders = order::list_orders(repo)?;
    log::info!(
        "Store holds {} clients, {} products and {} orders",
        clients.len(),
        products.len(),
        orders.len()
    );

    for entry in analytics::top_customers(repo, TOP_CUSTOMERS)? {
        log::info!(
            "Top customer {} {} (#{}): {} orders",
            entry.first_name,
            entry.last_name,
            entry.client_id,
            entry.order_count
        );
    }
    for point in analytics::order_dynamics(repo)? {
        log::info!("{}: {} orders", point.date, point.count);
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let app_config = match load_config() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match establish_connection_pool_with(
        &app_config.database_url,
        app_config.connection_options(),
    ) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            return ExitCode::FAILURE;
        }
    };

    let repo = DieselRepository::new(pool);
    if let Err(err) = repo.ensure_schema() {
        log::error!("Failed to prepare schema in {}: {err}", app_config.database_url);
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.as_slice() {
        [] => summarize(&repo),
        [command, base] if command == "export" => {
            transfer::export_data(&repo, Path::new(base)).map(|_| ())
        }
        [command, base] if command == "import" => {
            transfer::import_data(&repo, Path::new(base)).map(|_| ())
        }
        _ => {
            log::error!("Usage: pushkind-shop [export BASE | import BASE]");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
