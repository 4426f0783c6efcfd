use std::path::PathBuf;

use nz_walks_sdk::DEFAULT_PAGE_SIZE;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Configuration for the `nz-walks` module
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NzWalksConfig {
    #[serde(default)]
    pub walks: WalksQueryConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// How the walk query engine treats field names outside its allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Skip the stage as if the field had not been supplied.
    #[default]
    Ignore,
    /// Fail the request with an invalid-argument error.
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalksQueryConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    #[serde(default)]
    pub unknown_field_policy: UnknownFieldPolicy,
}

impl Default for WalksQueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            unknown_field_policy: UnknownFieldPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    /// Directory uploaded files are written to and served from.
    #[serde(default = "default_images_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
    /// Accepted extensions, lower-case with the leading dot.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            dir: default_images_dir(),
            max_file_size_bytes: default_max_file_size_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Bearer-token role checks for the region endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    /// HS256 shared secret used to verify tokens.
    #[serde(default, skip_serializing)]
    pub jwt_secret: Option<SecretString>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default = "default_leeway_seconds")]
    pub leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            jwt_secret: None,
            issuer: None,
            audience: None,
            leeway_seconds: default_leeway_seconds(),
        }
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_max_file_size_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    vec![".jpg".to_owned(), ".jpeg".to_owned(), ".png".to_owned()]
}

fn default_leeway_seconds() -> u64 {
    60
}
