mod args;
mod shell;


use args::Cli;
use clap::Parser;
use lockbox_client::{ClientConfig, Session};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = ClientConfig::from_path(&cli.config)?;
    let session = Session::connect(&config).await?;
    let output = shell::run(&session, cli.command).await?;
    println!("{output}");
    Ok(())
}
