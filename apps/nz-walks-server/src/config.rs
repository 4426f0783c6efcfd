//! Layered server configuration.
//!
//! Precedence, lowest first: built-in defaults, the YAML file given with
//! `--config`, `NZ_WALKS__*` environment variables (`__` separates nested
//! keys, e.g. `NZ_WALKS__SERVER__BIND_ADDR`), then CLI overrides.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use nz_walks::NzWalksConfig;
use nz_walks::api::rest::{PublicUrl, RestOptions};
use serde::{Deserialize, Serialize};

use crate::logging::LoggingConfig;

pub const ENV_PREFIX: &str = "NZ_WALKS__";
const MOCK_DSN: &str = "sqlite::memory:";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub module: NzWalksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Prefix all routes are mounted under, e.g. `/api`.
    #[serde(default)]
    pub base_path: String,
    /// Scheme used for image URLs when `X-Forwarded-Proto` is absent.
    #[serde(default = "default_scheme")]
    pub default_scheme: String,
    /// Host used for image URLs when the request has no `Host` header.
    #[serde(default = "default_host")]
    pub default_host: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            base_path: String::new(),
            default_scheme: default_scheme(),
            default_host: default_host(),
            request_timeout_secs: default_request_timeout_secs(),
            body_limit_bytes: default_body_limit_bytes(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn rest_options(&self) -> RestOptions {
        RestOptions {
            public_url: PublicUrl {
                base_path: self.base_path.clone(),
                default_scheme: self.default_scheme.clone(),
                default_host: self.default_host.clone(),
            },
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            body_limit_bytes: self.body_limit_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// `sqlite://…` or `postgres://…`, depending on the enabled driver.
    #[serde(default = "default_dsn")]
    pub dsn: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: default_dsn(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Every `:memory:` connection is a separate database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.dsn.contains(":memory:")
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Merge defaults, the optional YAML file and the environment.
    ///
    /// # Errors
    /// Fails when the file cannot be parsed or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(port) = cli.port {
            self.server.bind_addr.set_port(port);
        }
        match cli.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.filter),
            2 => "debug".clone_into(&mut self.logging.filter),
            _ => "trace".clone_into(&mut self.logging.filter),
        }
        if cli.mock {
            MOCK_DSN.clone_into(&mut self.database.dsn);
            self.database.max_connections = 1;
        }
    }

    /// # Errors
    /// Fails when the configuration cannot be serialized.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration as YAML")
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8087))
}

fn default_scheme() -> String {
    "http".to_owned()
}

fn default_host() -> String {
    "localhost:8087".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_body_limit_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_dsn() -> String {
    "sqlite://nz-walks.db?mode=rwc".to_owned()
}

fn default_max_connections() -> u32 {
    10
}
