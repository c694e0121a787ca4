//! Backend entry-point: loads settings, opens the store and serves the REST
//! API with OpenAPI docs.

mod server;

use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::MongoStore;
use backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let bind_addr = settings
        .bind_addr()
        .parse()
        .wrap_err_with(|| format!("invalid bind address {}", settings.bind_addr()))?;

    let mut config = ServerConfig::new(bind_addr);
    if !settings.memory_store {
        let store = MongoStore::connect(settings.mongodb_uri(), settings.database()).await?;
        store.ensure_indexes().await?;
        config = config.with_store(store);
    }

    create_server(config)?.await?;
    Ok(())
}
