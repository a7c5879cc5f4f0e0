#[macro_use]
extern crate rocket;

use mongodb::Client;
use rocket::http::Method;
use rocket::{Build, Rocket};
use rocket_cors::{AllowedHeaders, AllowedOrigins};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::{Config, StoreBackend};
use crate::error::{BackendError, ConfigurationError};
use crate::route::mount_api;
use crate::store::{DynStore, MemoryStore};

pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod resp;
pub mod route;
pub mod store;
pub mod util;
pub mod view;

#[cfg(test)]
mod testing;

pub fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Unable to set global logger: {}", err);
    };
}

fn load_config() -> Result<Config, ConfigurationError> {
    match Config::load() {
        Ok(c) => {
            tracing::info!("Configuration loaded.");
            Ok(c)
        }
        Err(ConfigurationError::NotFound(path)) => {
            tracing::info!("No configuration in '{}', using defaults.", path.display());
            let c = Config::default();
            if c.save().is_err() {
                tracing::warn!("Unable to save generated configuration.");
            }
            Ok(c)
        }
        Err(other) => {
            tracing::error!("Configuration error: {}", other);
            Err(other)
        }
    }
}

async fn connect_store(c: &Config) -> Result<DynStore, BackendError> {
    match c.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data will be lost on shutdown.");
            Ok(Box::new(MemoryStore::new()))
        }
        StoreBackend::MongoDb => {
            let uri = c.resolve_mongodb_uri()?;
            tracing::info!("Connecting to MongoDB...");
            let client = Client::with_uri_str(uri.as_str()).await?;

            tracing::info!("Using MongoDB database: {}", c.mongodb_db);
            let db = client.database(c.mongodb_db.as_str());
            if let Err(e) = db.list_collection_names(None).await {
                tracing::error!("Unable to connect to MongoDB.");
                return Err(e.into());
            }

            Ok(Box::new(db))
        }
    }
}

pub async fn create(log_level: Option<Level>) -> Result<Rocket<Build>, BackendError> {
    if dotenv::dotenv().is_err() {
        eprintln!("Unable to load .env file.");
    }

    let c = load_config()?;
    if let Some(level) = c.tracing_level().or(log_level) {
        init_logging(level);
    }

    let store = connect_store(&c).await?;
    build(c, store)
}

/// Assembles the server around an already connected store.
pub fn build(c: Config, store: DynStore) -> Result<Rocket<Build>, BackendError> {
    tracing::info!("Setting up CORS...");
    let allowed_origins = if c.cors_origins.is_empty() {
        AllowedOrigins::All
    } else {
        AllowedOrigins::some_exact(&c.cors_origins)
    };

    let cors = rocket_cors::CorsOptions {
        allowed_origins,
        allowed_methods: vec![
            Method::Get,
            Method::Put,
            Method::Post,
            Method::Delete,
            Method::Options,
        ]
        .into_iter()
        .map(From::from)
        .collect(),
        allowed_headers: AllowedHeaders::some(&["Authorization", "Content-Type"]),
        allow_credentials: true,
        ..Default::default()
    }
    .to_cors()?;

    if c.jwt_secret.is_none() {
        tracing::warn!("No JWT secret configured, API is open.");
    }

    let r = rocket::build().manage(c).manage(store).attach(cors);
    Ok(mount_api(r))
}
