use color_eyre::Result;
use listener_log::config::{
    config_from_env,
    CliArgs,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let filter = EnvFilter::from_default_env();
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: CliArgs = clap::Parser::parse();
    let conf = config_from_env(args)?;
    tracing::info!("Starting listener-log with config: {}", conf);

    listener_log::run_server(conf).await
}
