//! Shutter CLI entrypoint.

use clap::Parser;

mod commands;
mod config;
mod handlers;
mod notifier;

use commands::{AlbumCommands, Commands, ConfigCommands, PhotoCommands};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "shutter")]
#[command(author, version, about = "Shutter photo gallery command-line interface", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = CliConfig::load().unwrap_or_default();

    match cli.command {
        Commands::Photos { command } => match command {
            PhotoCommands::List {
                album,
                q,
                share_url,
            } => handlers::list_photos(&config, album, q, share_url).await?,
            PhotoCommands::Show { id } => handlers::show_photo(&config, &id).await?,
            PhotoCommands::Create {
                title,
                file,
                albums,
            } => handlers::create_photo(&config, &title, &file, albums).await?,
            PhotoCommands::Delete { id } => handlers::delete_photo(&config, &id).await?,
            PhotoCommands::SetAlbums { id, albums } => {
                handlers::set_photo_albums(&config, &id, albums).await?
            }
        },
        Commands::Albums { command } => match command {
            AlbumCommands::List => handlers::list_albums(&config).await?,
            AlbumCommands::Create { title, photos } => {
                handlers::create_album(&config, &title, photos).await?
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => handlers::show_config(&config)?,
            ConfigCommands::Set { key, value } => handlers::set_config(&key, &value)?,
        },
    }

    Ok(())
}
