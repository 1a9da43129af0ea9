use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{builder::DefaultState, ConfigBuilder, Environment, File, FileFormat};
use folio_models::{email_address::EmailAddressWithName, Sensitive};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable containing a colon separated list of config files.
pub const CONFIG_PATH_ENV: &str = "FOLIO_CONFIG";

const ENV_PREFIX: &str = "FOLIO";
const ENV_SEPARATOR: &str = "__";

/// Load the config from the files listed in `FOLIO_CONFIG` (or the default
/// config file) and the `FOLIO_*` environment variables.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var_os(CONFIG_PATH_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    load_with_override(&paths, &[])
}

/// Load the default config file, ignoring the environment.
pub fn load_dev_config() -> anyhow::Result<Config> {
    from_files(&[Path::new(DEFAULT_CONFIG_PATH)])?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// Load the given config files, followed by the environment and finally the
/// given inline toml snippets.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let environment = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(ENV_SEPARATOR)
        .list_separator(",")
        .with_list_parse_key("http.allowed_origins")
        .try_parsing(true);

    let builder = from_files(paths)?.add_source(environment);

    overrides
        .iter()
        .fold(builder, |builder, &snippet| {
            builder.add_source(File::from_str(snippet, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn from_files(paths: &[impl AsRef<Path>]) -> anyhow::Result<ConfigBuilder<DefaultState>> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub from: EmailAddressWithName,
    pub api_key: Option<Sensitive<String>>,
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub email: EmailAddressWithName,
    pub default_subject: String,
}
