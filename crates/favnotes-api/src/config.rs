//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3001` |
//! | `FAVNOTES_DATA_DIR` | `data` |
//! | `FAVNOTES_DATA_FALLBACK_DIR` | `../data` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000,http://localhost:3001` |

use std::net::SocketAddr;
use std::path::PathBuf;

use favnotes_core::defaults;
use favnotes_core::{Error, Result};
use favnotes_enrich::FsDatasetStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub data_fallback_dir: PathBuf,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            data_dir: PathBuf::from(defaults::DATA_DIR),
            data_fallback_dir: PathBuf::from(defaults::DATA_FALLBACK_DIR),
            allowed_origins: split_origins(defaults::ALLOWED_ORIGINS),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup function.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", raw)))?,
            None => base.port,
        };

        let allowed_origins = var("ALLOWED_ORIGINS")
            .map(|raw| split_origins(&raw))
            .filter(|origins| !origins.is_empty())
            .unwrap_or(base.allowed_origins);

        Ok(Self {
            host: var("HOST").unwrap_or(base.host),
            port,
            data_dir: var("FAVNOTES_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(base.data_dir),
            data_fallback_dir: var("FAVNOTES_DATA_FALLBACK_DIR")
                .map(PathBuf::from)
                .unwrap_or(base.data_fallback_dir),
            allowed_origins,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address: {}", e)))
    }

    pub fn dataset_store(&self) -> FsDatasetStore {
        FsDatasetStore::new(&self.data_dir, &self.data_fallback_dir)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
