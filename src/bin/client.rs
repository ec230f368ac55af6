use clap::{
    Parser,
    Subcommand,
};
use color_eyre::{
    eyre::eyre,
    Result,
};
use listener_log::{
    entry::LogEntry,
    error::ErrorBody,
    request::AppendRequest,
    routes::{
        AppendResponse,
        EntriesResponse,
    },
};
use reqwest::{
    Client,
    Response,
    Url,
};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listener-log-client", version, about = "Talks to a listener-log server")]
struct Args {
    /// Base URL of the server
    #[arg(long, default_value = "http://127.0.0.1:8888/")]
    url: Url,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current entries, newest first
    List,
    /// Append an entry; omitted fields are picked at random by the server
    Append {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Required by the server when a custom name or location is given
        #[arg(long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::from_default_env();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Args { url, command } = Args::parse();
    let client = Client::new();

    match command {
        Command::List => {
            let resp = client.get(url.clone()).send().await?;
            let EntriesResponse { entries } = decode(resp).await?;
            for entry in entries.entries() {
                println!("{}", format_entry(entry));
            }
        }
        Command::Append {
            name,
            location,
            email,
        } => {
            let req = AppendRequest {
                custom_name: name,
                custom_location: location,
                email,
            };
            tracing::debug!("Posting {:?} to {}", req, url);
            let resp = client.post(url.clone()).json(&req).send().await?;
            let AppendResponse { entry, entries, .. } = decode(resp).await?;
            println!("{}", format_entry(&entry));
            tracing::info!("Log now holds {} entries", entries.len());
        }
    }

    Ok(())
}

/// Decodes a success body, or turns the server's error body into an error
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(ErrorBody { error }) => error,
        Err(_) => status.to_string(),
    };
    Err(eyre!("Server answered {}: {}", status, message))
}

fn format_entry(entry: &LogEntry) -> String {
    let when = chrono::DateTime::from_timestamp_millis(entry.timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| entry.timestamp.to_string());
    format!("{when}  {} @ {}", entry.name, entry.location)
}
