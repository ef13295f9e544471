use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chirp_engine::{Credentials, PublishSettings};

use crate::cli::Cli;

const LOG_FILENAME: &str = "post_log.txt";

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub root: PathBuf,
    pub log_file: PathBuf,
    pub max_attempts: u32,
    pub credentials: Credentials,
    pub publish: PublishSettings,
}

impl AppConfig {
    /// Load the env file, then resolve configuration from the process environment.
    pub fn load(cli: &Cli) -> Result<Self> {
        match &cli.env_file {
            Some(path) => {
                dotenvy::from_path(path)
                    .with_context(|| format!("failed to load env file {}", path.display()))?;
            }
            None => optional_env_file(dotenvy::dotenv())?,
        }
        Self::from_lookup(cli, |name| std::env::var(name).ok())
    }

    /// Missing credentials fail here, before any photo is touched.
    pub fn from_lookup(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).unwrap_or_default();
        let credentials = Credentials {
            api_key: var("API_KEY"),
            api_secret: var("API_SECRET"),
            access_token: var("ACCESS_TOKEN"),
            access_token_secret: var("ACCESS_TOKEN_SECRET"),
        };
        let missing = credentials.missing();
        if !missing.is_empty() {
            bail!("missing credentials: {} must be set", missing.join(", "));
        }

        if cli.timeout_secs == 0 {
            bail!("--timeout-secs must be greater than zero");
        }

        let mut publish = PublishSettings {
            request_timeout: Duration::from_secs(cli.timeout_secs),
            ..PublishSettings::default()
        };
        if let Some(url) = lookup("CHIRP_UPLOAD_URL") {
            publish.upload_url = url;
        }
        if let Some(url) = lookup("CHIRP_POST_URL") {
            publish.post_url = url;
        }

        Ok(Self {
            root: cli.root.clone(),
            log_file: cli
                .log_file
                .clone()
                .unwrap_or_else(|| cli.root.join(LOG_FILENAME)),
            max_attempts: cli.max_attempts,
            credentials,
            publish,
        })
    }
}

/// A missing default `.env` is fine; a malformed one is not.
fn optional_env_file<T>(loaded: std::result::Result<T, dotenvy::Error>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err).context("failed to load .env"),
    }
}
