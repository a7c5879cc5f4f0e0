use crate::error::ConfigurationError;
use crate::util;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

fn default_mongodb_uri() -> String {
    env::var("MONGODB_URI").unwrap_or("mongodb://localhost:27017".to_string())
}

fn default_mongodb_uri_file() -> Option<PathBuf> {
    env::var("MONGODB_URI_FILE").ok().map(PathBuf::from)
}

fn default_mongodb_db() -> String {
    env::var("MONGODB_DB_NAME").unwrap_or("classroll".to_string())
}

fn default_store() -> StoreBackend {
    match env::var("CLASSROLL_STORE").as_deref() {
        Ok("memory") => StoreBackend::Memory,
        _ => StoreBackend::MongoDb,
    }
}

fn default_cors_origins() -> Vec<String> {
    util::split_list(&env::var("CORS_ORIGINS").unwrap_or("http://localhost:3000".to_string()))
}

fn default_jwt_secret() -> Option<String> {
    env::var("AUTH_JWT_SECRET").ok().filter(|it| !it.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub(crate) file_path: PathBuf,

    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: String,
    /// File holding the connection string, for deployments that mount credentials as secrets.
    #[serde(default = "default_mongodb_uri_file")]
    pub mongodb_uri_file: Option<PathBuf>,
    #[serde(default = "default_mongodb_db")]
    pub mongodb_db: String,

    #[serde(default = "default_store")]
    pub store: StoreBackend,

    /// Frontend origins allowed by CORS. Empty allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// HS256 secret shared with the identity provider. API is open when unset.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: Option<String>,

    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file_path: config_dir().join("settings.yml"),
            mongodb_uri: default_mongodb_uri(),
            mongodb_uri_file: default_mongodb_uri_file(),
            mongodb_db: default_mongodb_db(),
            store: default_store(),
            cors_origins: default_cors_origins(),
            jwt_secret: default_jwt_secret(),
            log_level: None,
        }
    }
}

#[inline]
fn config_dir() -> PathBuf {
    PathBuf::from(env::var("CONFIG_DIR").unwrap_or("./config".to_string()))
}

impl Config {
    pub fn load() -> Result<Config, ConfigurationError> {
        Config::load_from(config_dir())
    }

    pub fn load_from(dir: impl AsRef<Path>) -> Result<Config, ConfigurationError> {
        let dir = dir.as_ref();
        let config_file =
            util::find_first_subpath(dir, &["settings.yml", "settings.yaml"], Path::exists)
                .ok_or_else(|| ConfigurationError::NotFound(dir.to_path_buf()))?;

        let file = File::open(&config_file)?;
        let mut config: Config = serde_yaml::from_reader(BufReader::new(file))?;
        config.file_path = config_file;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigurationError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.file_path)?;
        let mut out = BufWriter::new(file);
        serde_yaml::to_writer(&mut out, self)?;
        out.flush()?;
        Ok(())
    }

    /// In-memory store, no auth, any origin.
    pub fn local() -> Config {
        Config {
            store: StoreBackend::Memory,
            cors_origins: vec![],
            jwt_secret: None,
            ..Default::default()
        }
    }

    /// Connection string, read from `mongodb_uri_file` when one is configured.
    pub fn resolve_mongodb_uri(&self) -> Result<String, ConfigurationError> {
        match &self.mongodb_uri_file {
            Some(path) => fs::read_to_string(path)
                .map(|it| it.trim().to_string())
                .map_err(|e| ConfigurationError::Secret(path.clone(), e)),
            None => Ok(self.mongodb_uri.clone()),
        }
    }

    pub fn tracing_level(&self) -> Option<tracing::Level> {
        self.log_level.as_deref().and_then(|it| it.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("classroll-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).expect("unable to create temp dir");
        dir
    }

    #[test]
    fn missing_settings_file_is_reported() {
        let dir = temp_dir("missing");
        match Config::load_from(&dir) {
            Err(ConfigurationError::NotFound(path)) => assert_eq!(path, dir),
            other => panic!("expected NotFound, got {:?}", other),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let dir = temp_dir("load");
        fs::write(
            dir.join("settings.yml"),
            "mongodb_db: roll\nstore: memory\ncors_origins: []\nlog_level: warn\n",
        )
        .expect("unable to write settings");

        let config = Config::load_from(&dir).expect("valid settings");
        assert_eq!(config.mongodb_db, "roll");
        assert_eq!(config.store, StoreBackend::Memory);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.tracing_level(), Some(tracing::Level::WARN));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn uri_is_read_from_secret_file() {
        let dir = temp_dir("secret");
        let secret = dir.join("mongodb_uri");
        fs::write(&secret, "mongodb://db.internal:27017\n").expect("unable to write secret");

        let config = Config {
            mongodb_uri_file: Some(secret),
            ..Config::local()
        };
        assert_eq!(
            config.resolve_mongodb_uri().expect("readable secret"),
            "mongodb://db.internal:27017"
        );
        fs::remove_dir_all(dir).ok();
    }
}
