use std::{
    env,
    fmt::Display,
    net::SocketAddr,
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use clap::ValueEnum;
use color_eyre::{
    eyre::{
        eyre,
        WrapErr,
    },
    Result,
};
use reqwest::Url;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8888";
const DEFAULT_STORE_NAME: &str = "listener-log";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_TIMEOUT_SECS: &str = "10";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    Memory,
    File,
    Http,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    File { data_dir: PathBuf },
    Http { base_url: Url, token: Option<String> },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub store_name: String,
    pub store_backend: StoreBackend,
    pub request_timeout: Duration,
}

/// Command-line flags that take precedence over the environment
#[derive(Debug, Default, clap::Parser)]
#[command(name = "listener-log", version, about = "Bounded append-log HTTP service")]
pub struct CliArgs {
    /// Socket address to listen on
    #[arg(long)]
    pub host: Option<SocketAddr>,
    /// Blob store backend
    #[arg(long, value_enum)]
    pub store: Option<BackendKind>,
    /// Root directory of the file backend
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let backend = match &self.store_backend {
            StoreBackend::Memory => "memory".to_string(),
            StoreBackend::File { data_dir } => format!("file({})", data_dir.display()),
            StoreBackend::Http { base_url, .. } => format!("http({})", base_url),
        };
        write!(
            f,
            "Config {{ listen_addr: {}, store: {}/{}, request_timeout: {:?} }}",
            self.listen_addr, backend, self.store_name, self.request_timeout
        )
    }
}

/// Loads `.env` if present, then reads the process environment
pub fn config_from_env(args: CliArgs) -> Result<Config> {
    if let Err(e) = dotenv::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }
    config_from_lookup(|key| env::var(key).ok(), args)
}

/// Builds the config from any variable source; flags in `args` win over variables.
pub fn config_from_lookup<F>(lookup: F, args: CliArgs) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let listen_addr = match args.host {
        Some(host) => host,
        None => try_load(&lookup, "LISTEN_ADDR", DEFAULT_LISTEN_ADDR)?,
    };
    let store_name: String = try_load(&lookup, "STORE_NAME", DEFAULT_STORE_NAME)?;
    let timeout_secs: u64 = try_load(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

    let kind = match args.store {
        Some(kind) => kind,
        None => match lookup("STORE_BACKEND") {
            Some(raw) => <BackendKind as ValueEnum>::from_str(&raw, true)
                .map_err(|e| eyre!("Invalid STORE_BACKEND value: {}", e))?,
            None => BackendKind::File,
        },
    };

    let store_backend = match kind {
        BackendKind::Memory => StoreBackend::Memory,
        BackendKind::File => StoreBackend::File {
            data_dir: match args.data_dir {
                Some(dir) => dir,
                None => try_load(&lookup, "DATA_DIR", DEFAULT_DATA_DIR)?,
            },
        },
        BackendKind::Http => {
            let raw = lookup("BLOB_URL")
                .ok_or_else(|| eyre!("BLOB_URL must be set for the http store backend"))?;
            let base_url = Url::parse(&raw).wrap_err("Invalid BLOB_URL")?;
            StoreBackend::Http {
                base_url,
                token: lookup("BLOB_TOKEN").filter(|t| !t.is_empty()),
            }
        }
    };

    Ok(Config {
        listen_addr,
        store_name,
        store_backend,
        request_timeout: Duration::from_secs(timeout_secs),
    })
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        tracing::info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| eyre!("Invalid {} value {:?}: {}", key, raw, e))
}
